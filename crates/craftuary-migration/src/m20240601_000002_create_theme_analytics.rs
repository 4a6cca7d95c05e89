use sea_orm_migration::prelude::*;

/// Migration 2: Create the append-only theme action log.
///
/// `theme_id` carries no foreign key constraint: the log is best-effort and
/// must never block or fail a theme hard delete.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ── theme_analytics table ───────────────────────────────────────
        db.execute_unprepared(
            "CREATE TABLE IF NOT EXISTS theme_analytics (
                id BIGSERIAL PRIMARY KEY,
                theme_id INTEGER NOT NULL,
                action_type VARCHAR(20) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
        )
        .await?;

        // ── indexes ─────────────────────────────────────────────────────
        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_theme_analytics_theme_id
             ON theme_analytics(theme_id)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_theme_analytics_created_at
             ON theme_analytics(created_at)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS theme_analytics")
            .await?;
        Ok(())
    }
}
