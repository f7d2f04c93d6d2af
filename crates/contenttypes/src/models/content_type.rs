//! ContentType model and CRUD operations.
//!
//! Content type rows identify a model by (app_label, model) and give
//! other tables a stable surrogate id to reference for generic
//! relations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Content type record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentType {
    /// Surrogate key assigned by the database.
    pub id: i32,

    /// Application the model belongs to (e.g., "auth", "blog").
    pub app_label: String,

    /// Model name within the application (e.g., "user", "post").
    pub model: String,
}

/// Input for creating a content type row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentType {
    pub app_label: String,
    pub model: String,
}

impl ContentType {
    /// Find a content type by its (app_label, model) natural key.
    pub async fn find_by_natural_key(
        pool: &PgPool,
        app_label: &str,
        model: &str,
    ) -> Result<Option<Self>> {
        let content_type = sqlx::query_as::<_, ContentType>(
            "SELECT id, app_label, model FROM content_type WHERE app_label = $1 AND model = $2",
        )
        .bind(app_label)
        .bind(model)
        .fetch_optional(pool)
        .await
        .context("failed to fetch content type")?;

        Ok(content_type)
    }

    /// List all content types.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let types = sqlx::query_as::<_, ContentType>(
            "SELECT id, app_label, model FROM content_type ORDER BY app_label, model",
        )
        .fetch_all(pool)
        .await
        .context("failed to list content types")?;

        Ok(types)
    }

    /// Create or update a content type row (upsert on the natural key).
    ///
    /// The conflict branch is a no-op update so RETURNING yields the
    /// existing row with its original id.
    pub async fn upsert(pool: &PgPool, input: CreateContentType) -> Result<Self> {
        let content_type = sqlx::query_as::<_, ContentType>(
            r#"
            INSERT INTO content_type (app_label, model)
            VALUES ($1, $2)
            ON CONFLICT (app_label, model) DO UPDATE SET
                app_label = EXCLUDED.app_label
            RETURNING id, app_label, model
            "#,
        )
        .bind(&input.app_label)
        .bind(&input.model)
        .fetch_one(pool)
        .await
        .context("failed to upsert content type")?;

        Ok(content_type)
    }

    /// Delete a content type row.
    pub async fn delete(pool: &PgPool, app_label: &str, model: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM content_type WHERE app_label = $1 AND model = $2")
            .bind(app_label)
            .bind(model)
            .execute(pool)
            .await
            .context("failed to delete content type")?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if a content type row exists.
    pub async fn exists(pool: &PgPool, app_label: &str, model: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM content_type WHERE app_label = $1 AND model = $2)",
        )
        .bind(app_label)
        .bind(model)
        .fetch_one(pool)
        .await
        .context("failed to check content type existence")?;

        Ok(exists)
    }
}
