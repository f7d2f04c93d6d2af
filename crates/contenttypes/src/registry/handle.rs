//! Model handles and type-erased instances.
//!
//! A handle owns the storage access for one registered model. The
//! lookup layer never touches storage directly, so handles backed by
//! different tables (or different stores entirely) coexist in one
//! registry.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_query::{Alias, Expr, PostgresQueryBuilder, Query};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};

/// Identity of a registered model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Application the model belongs to.
    pub app_label: String,

    /// Model name within the application.
    pub model: String,
}

impl ModelMeta {
    pub fn new(app_label: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model: model.into(),
        }
    }
}

/// Type-erased record returned by generic lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Primary key of the record.
    pub object_id: i64,

    /// Application the record's model belongs to.
    pub app_label: String,

    /// Model name of the record.
    pub model: String,

    /// Dynamic field storage (JSONB).
    pub fields: serde_json::Value,
}

/// Storage access for one registered model.
#[async_trait]
pub trait ModelHandle: Send + Sync + std::fmt::Debug {
    /// Identity of this model.
    fn meta(&self) -> &ModelMeta;

    /// Fetch a single record by primary key.
    ///
    /// Returns `Ok(None)` when no record with that id exists; storage
    /// errors propagate as-is.
    async fn get(&self, object_id: i64) -> Result<Option<Instance>>;
}

/// Stock sqlx-backed handle reading one table.
///
/// The table needs `id BIGINT` and `fields JSONB` columns. The table
/// name is dynamic, so the query is built through sea-query rather
/// than a static SQL string.
#[derive(Debug)]
pub struct TableModel {
    meta: ModelMeta,
    table: String,
    pool: PgPool,
}

impl TableModel {
    pub fn new(meta: ModelMeta, table: impl Into<String>, pool: PgPool) -> Self {
        Self {
            meta,
            table: table.into(),
            pool,
        }
    }
}

#[async_trait]
impl ModelHandle for TableModel {
    fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    async fn get(&self, object_id: i64) -> Result<Option<Instance>> {
        let sql = Query::select()
            .columns([Alias::new("id"), Alias::new("fields")])
            .from(Alias::new(&self.table))
            .and_where(Expr::col(Alias::new("id")).eq(object_id))
            .to_string(PostgresQueryBuilder);

        let row = sqlx::query(&sql)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to fetch {} record", self.table))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let object_id: i64 = row.try_get("id").context("missing id column")?;
        let fields: serde_json::Value = row.try_get("fields").context("missing fields column")?;

        Ok(Some(Instance {
            object_id,
            app_label: self.meta.app_label.clone(),
            model: self.meta.model.clone(),
            fields,
        }))
    }
}
