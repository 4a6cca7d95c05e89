//! Admin catalog CRUD. All four handlers sit behind the admin session
//! middleware; see `auth::middleware`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::themes::ThemeResponse;
use crate::catalog::sort::{SortColumn, SortOrder};
use craftuary_db::entities::theme;
use craftuary_db::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    pub status: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<i32>,
}

/// Theme fields as submitted by the admin form. Create and update share this
/// shape; both run the same required-field check and category derivation.
#[derive(Debug, Default, Deserialize)]
pub struct ThemePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub technology: Option<String>,
    pub thumbnail: Option<String>,
    pub preview_url: Option<String>,
    pub download_url: Option<String>,
    pub deploy_url: Option<String>,
    pub is_free: Option<bool>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub featured: Option<bool>,
    pub status: Option<String>,
}

impl ThemePayload {
    /// First required field that is absent or blank, in the order the admin
    /// form presents them.
    fn first_missing_field(&self) -> Option<&'static str> {
        let fields = [
            ("name", &self.name),
            ("description", &self.description),
            ("category", &self.category),
            ("technology", &self.technology),
            ("thumbnail", &self.thumbnail),
            ("preview_url", &self.preview_url),
            ("download_url", &self.download_url),
            ("deploy_url", &self.deploy_url),
        ];
        fields
            .iter()
            .find(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
    }

    /// Primary category plus the JSON-encoded list stored alongside it. The
    /// primary mirrors the first list entry; a payload without a list gets
    /// the single-element list of its `category`.
    fn category_fields(&self) -> (String, String) {
        let categories = match &self.categories {
            Some(list) if !list.is_empty() => list.clone(),
            _ => vec![self.category.clone().unwrap_or_default()],
        };
        let primary = categories[0].clone();
        let encoded = serde_json::to_string(&categories).unwrap_or_else(|_| "[]".to_string());
        (primary, encoded)
    }
}

fn server_error(context: &str, e: sea_orm::DbErr, message: &str) -> (StatusCode, Json<Value>) {
    tracing::error!("{context}: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

fn missing_id() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Theme ID is required" })),
    )
}

/// GET /api/admin/themes — all rows, drafts and archived included.
pub async fn list_themes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdminListParams>,
) -> Result<Json<Vec<ThemeResponse>>, (StatusCode, Json<Value>)> {
    let sort = SortColumn::from_param(params.sort_by.as_deref());
    let order = SortOrder::from_param(params.order.as_deref());

    let mut query = theme::Entity::find();
    if let Some(status) = params.status.as_deref().filter(|s| *s != "all") {
        query = query.filter(theme::Column::Status.eq(status));
    }

    let rows = query
        .order_by(sort.column(), order.into())
        .all(&state.db)
        .await
        .map_err(|e| server_error("admin theme listing failed", e, "Failed to fetch themes"))?;

    Ok(Json(rows.into_iter().map(ThemeResponse::from).collect()))
}

/// POST /api/admin/themes — create a theme, returning its generated id.
pub async fn create_theme(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ThemePayload>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if let Some(field) = payload.first_missing_field() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Missing required field: {field}") })),
        ));
    }

    let (primary, categories_json) = payload.category_fields();
    let now = chrono::Utc::now().fixed_offset();

    let row = theme::ActiveModel {
        name: Set(payload.name.clone().unwrap_or_default()),
        description: Set(payload.description.clone().unwrap_or_default()),
        category: Set(primary),
        categories: Set(Some(categories_json)),
        technology: Set(payload.technology.clone().unwrap_or_default()),
        thumbnail: Set(payload.thumbnail.clone().unwrap_or_default()),
        preview_url: Set(payload.preview_url.clone().unwrap_or_default()),
        download_url: Set(payload.download_url.clone().unwrap_or_default()),
        deploy_url: Set(payload.deploy_url.clone().unwrap_or_default()),
        is_free: Set(payload.is_free.unwrap_or(true)),
        price: Set(payload.price.unwrap_or(0.0)),
        stock_quantity: Set(payload.stock_quantity),
        downloads: Set(0),
        views: Set(0),
        featured: Set(payload.featured.unwrap_or(false)),
        status: Set(payload.status.clone().unwrap_or_else(|| "active".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = row
        .insert(&state.db)
        .await
        .map_err(|e| server_error("theme insert failed", e, "Failed to create theme"))?;

    tracing::info!(theme_id = model.id, theme_name = %model.name, "theme created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": model.id,
            "message": "Theme created successfully"
        })),
    ))
}

/// PUT /api/admin/themes?id=N — full replace of every column.
///
/// One UPDATE statement, no prior lookup: an id that matches no row (or a
/// row deleted concurrently) is a zero-row no-op that still reports success.
pub async fn update_theme(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
    Json(payload): Json<ThemePayload>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(id) = params.id else {
        return Err(missing_id());
    };

    if let Some(field) = payload.first_missing_field() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Missing required field: {field}") })),
        ));
    }

    let (primary, categories_json) = payload.category_fields();

    theme::Entity::update_many()
        .col_expr(
            theme::Column::Name,
            Expr::value(payload.name.clone().unwrap_or_default()),
        )
        .col_expr(
            theme::Column::Description,
            Expr::value(payload.description.clone().unwrap_or_default()),
        )
        .col_expr(theme::Column::Category, Expr::value(primary))
        .col_expr(theme::Column::Categories, Expr::value(Some(categories_json)))
        .col_expr(
            theme::Column::Technology,
            Expr::value(payload.technology.clone().unwrap_or_default()),
        )
        .col_expr(
            theme::Column::Thumbnail,
            Expr::value(payload.thumbnail.clone().unwrap_or_default()),
        )
        .col_expr(
            theme::Column::PreviewUrl,
            Expr::value(payload.preview_url.clone().unwrap_or_default()),
        )
        .col_expr(
            theme::Column::DownloadUrl,
            Expr::value(payload.download_url.clone().unwrap_or_default()),
        )
        .col_expr(
            theme::Column::DeployUrl,
            Expr::value(payload.deploy_url.clone().unwrap_or_default()),
        )
        .col_expr(theme::Column::IsFree, Expr::value(payload.is_free.unwrap_or(true)))
        .col_expr(theme::Column::Price, Expr::value(payload.price.unwrap_or(0.0)))
        .col_expr(
            theme::Column::StockQuantity,
            Expr::value(payload.stock_quantity),
        )
        .col_expr(
            theme::Column::Featured,
            Expr::value(payload.featured.unwrap_or(false)),
        )
        .col_expr(
            theme::Column::Status,
            Expr::value(payload.status.clone().unwrap_or_else(|| "active".to_string())),
        )
        .col_expr(
            theme::Column::UpdatedAt,
            Expr::value(chrono::Utc::now().fixed_offset()),
        )
        .filter(theme::Column::Id.eq(id))
        .exec(&state.db)
        .await
        .map_err(|e| server_error("theme update failed", e, "Failed to update theme"))?;

    tracing::info!(theme_id = id, "theme updated");

    Ok(Json(json!({
        "success": true,
        "message": "Theme updated successfully"
    })))
}

/// DELETE /api/admin/themes?id=N — unconditional hard delete.
pub async fn delete_theme(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(id) = params.id else {
        return Err(missing_id());
    };

    // No existence check: deleting an absent id succeeds with zero rows.
    theme::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|e| server_error("theme delete failed", e, "Failed to delete theme"))?;

    tracing::info!(theme_id = id, "theme deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Theme deleted successfully"
    })))
}
