//! Database connection pool management.

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    Ok(pool)
}

/// Check if the database connection is healthy.
pub async fn check_health(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

/// Create the `content_type` table when it does not exist yet.
///
/// The table mirrors the in-memory registry; `app_label` and `model`
/// form the natural key.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_type (
            id SERIAL PRIMARY KEY,
            app_label TEXT NOT NULL,
            model TEXT NOT NULL,
            UNIQUE (app_label, model)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create content_type table")?;

    Ok(())
}
