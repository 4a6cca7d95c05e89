use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only action log. `theme_id` is a loose reference — no foreign key
/// constraint, so deleting a theme never fails on logged actions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "theme_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub theme_id: i32,
    pub action_type: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
