use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "themes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    /// JSON-encoded list of categories; `category` mirrors the first entry.
    #[sea_orm(column_type = "Text", nullable)]
    pub categories: Option<String>,
    pub technology: String,
    pub thumbnail: String,
    pub preview_url: String,
    pub download_url: String,
    pub deploy_url: String,
    pub is_free: bool,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock_quantity: Option<i32>,
    pub downloads: i64,
    pub views: i64,
    pub featured: bool,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Decode the `categories` column, falling back to the single primary
    /// category when the column is null or holds invalid JSON.
    pub fn categories_list(&self) -> Vec<String> {
        self.categories
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_else(|| vec![self.category.clone()])
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(categories: Option<&str>) -> Model {
        let now = chrono::Utc::now().fixed_offset();
        Model {
            id: 1,
            name: "Sample".into(),
            description: "A sample theme".into(),
            category: "Business".into(),
            categories: categories.map(|s| s.to_string()),
            technology: "React".into(),
            thumbnail: "https://example.com/t.png".into(),
            preview_url: "https://example.com/p".into(),
            download_url: "https://example.com/d".into(),
            deploy_url: "https://example.com/y".into(),
            is_free: true,
            price: 0.0,
            stock_quantity: None,
            downloads: 0,
            views: 0,
            featured: false,
            status: "active".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_categories_round_trip() {
        let model = sample(Some(r#"["Business","SaaS"]"#));
        assert_eq!(model.categories_list(), vec!["Business", "SaaS"]);
    }

    #[test]
    fn test_categories_null_falls_back_to_primary() {
        let model = sample(None);
        assert_eq!(model.categories_list(), vec!["Business"]);
    }

    #[test]
    fn test_categories_invalid_json_falls_back_to_primary() {
        let model = sample(Some("not-json"));
        assert_eq!(model.categories_list(), vec!["Business"]);
    }
}
