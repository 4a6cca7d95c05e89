//! Action tracker: per-theme usage counters plus a best-effort analytics log.
//!
//! The counter update and the log insert are two independent writes with no
//! transaction between them; a log failure never rolls back the counter.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect, Set,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use craftuary_db::entities::{theme, theme_analytics};
use craftuary_db::AppState;

/// Trackable theme actions. View-like actions bump `views`, acquisition-like
/// actions bump `downloads`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackedAction {
    View,
    Preview,
    Download,
    Deploy,
}

impl TrackedAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "view" => Some(Self::View),
            "preview" => Some(Self::Preview),
            "download" => Some(Self::Download),
            "deploy" => Some(Self::Deploy),
            _ => None,
        }
    }

    /// Counter column this action increments.
    pub fn counter(self) -> theme::Column {
        match self {
            Self::View | Self::Preview => theme::Column::Views,
            Self::Download | Self::Deploy => theme::Column::Downloads,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Preview => "preview",
            Self::Download => "download",
            Self::Deploy => "deploy",
        }
    }
}

/// Both fields are optional at the wire level so a missing one yields the
/// request-shape error below instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct TrackActionRequest {
    #[serde(rename = "themeId")]
    pub theme_id: Option<i32>,
    #[serde(rename = "actionType")]
    pub action_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    #[serde(rename = "themeId")]
    pub theme_id: Option<i32>,
}

/// Single server-side increment expression: safe under concurrent calls.
fn counter_update(action: TrackedAction, theme_id: i32) -> sea_orm::UpdateMany<theme::Entity> {
    let counter = action.counter();
    theme::Entity::update_many()
        .col_expr(counter, Expr::col(counter).add(1))
        .filter(theme::Column::Id.eq(theme_id))
}

/// POST /api/themes/track — bump the counter, then append the log row.
pub async fn track_action(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TrackActionRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let (Some(theme_id), Some(raw_action)) = (body.theme_id, body.action_type.as_deref()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Theme ID and action type are required" })),
        ));
    };

    let Some(action) = TrackedAction::parse(raw_action) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid action type" })),
        ));
    };

    counter_update(action, theme_id)
        .exec(&state.db)
        .await
        .map_err(|e| {
            tracing::error!(theme_id, "counter update failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to track action" })),
            )
        })?;

    // Best-effort log append; failures are swallowed so the counter update
    // above always stands.
    let log_row = theme_analytics::ActiveModel {
        theme_id: Set(theme_id),
        action_type: Set(action.as_str().to_string()),
        created_at: Set(chrono::Utc::now().fixed_offset()),
        ..Default::default()
    };
    if let Err(e) = log_row.insert(&state.db).await {
        tracing::warn!(
            theme_id,
            action = action.as_str(),
            "analytics log insert failed: {e}"
        );
    }

    Ok(Json(json!({
        "success": true,
        "message": "Action tracked successfully"
    })))
}

#[derive(Debug, FromQueryResult)]
struct CounterRow {
    downloads: i64,
    views: i64,
}

/// GET /api/themes/track?themeId=N — per-theme or aggregate stats.
pub async fn theme_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if let Some(id) = params.theme_id {
        let model = theme::Entity::find_by_id(id)
            .one(&state.db)
            .await
            .map_err(|e| {
                tracing::error!(theme_id = id, "stats lookup failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch statistics" })),
                )
            })?;

        let Some(t) = model else {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Theme not found" })),
            ));
        };

        return Ok(Json(json!({
            "id": t.id,
            "name": t.name,
            "downloads": t.downloads,
            "views": t.views
        })));
    }

    // Aggregate over active rows only.
    let rows = theme::Entity::find()
        .select_only()
        .column(theme::Column::Downloads)
        .column(theme::Column::Views)
        .filter(theme::Column::Status.eq("active"))
        .into_model::<CounterRow>()
        .all(&state.db)
        .await
        .map_err(|e| {
            tracing::error!("aggregate stats query failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch statistics" })),
            )
        })?;

    let total_themes = rows.len() as u64;
    let total_downloads: i64 = rows.iter().map(|r| r.downloads).sum();
    let total_views: i64 = rows.iter().map(|r| r.views).sum();
    let (avg_downloads, avg_views) = if total_themes == 0 {
        (0.0, 0.0)
    } else {
        (
            total_downloads as f64 / total_themes as f64,
            total_views as f64 / total_themes as f64,
        )
    };

    Ok(Json(json!({
        "total_themes": total_themes,
        "total_downloads": total_downloads,
        "total_views": total_views,
        "avg_downloads": avg_downloads,
        "avg_views": avg_views
    })))
}
