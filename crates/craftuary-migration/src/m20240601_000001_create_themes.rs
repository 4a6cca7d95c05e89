use sea_orm_migration::prelude::*;

/// Migration 1: Create the themes catalog table.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ── themes table ────────────────────────────────────────────────
        db.execute_unprepared(
            "CREATE TABLE IF NOT EXISTS themes (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                description TEXT NOT NULL,
                category VARCHAR(100) NOT NULL,
                categories TEXT,
                technology VARCHAR(100) NOT NULL,
                thumbnail VARCHAR(500) NOT NULL,
                preview_url VARCHAR(500) NOT NULL,
                download_url VARCHAR(500) NOT NULL,
                deploy_url VARCHAR(500) NOT NULL,
                is_free BOOLEAN NOT NULL DEFAULT TRUE,
                price DOUBLE PRECISION NOT NULL DEFAULT 0,
                stock_quantity INTEGER,
                downloads BIGINT NOT NULL DEFAULT 0,
                views BIGINT NOT NULL DEFAULT 0,
                featured BOOLEAN NOT NULL DEFAULT FALSE,
                status VARCHAR(20) NOT NULL DEFAULT 'active',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
        )
        .await?;

        // ── indexes ─────────────────────────────────────────────────────
        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_themes_status
             ON themes(status)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_themes_technology
             ON themes(technology)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_themes_category
             ON themes(category)",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_themes_created_at
             ON themes(created_at DESC)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS themes").await?;
        Ok(())
    }
}
