//! Content type registry.
//!
//! Models are registered in memory by the embedding application at
//! startup and cached for fast lookup. `sync` mirrors the registry to
//! the `content_type` table so generic relations can reference stable
//! row ids.

use std::sync::Arc;

use anyhow::Result;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::{ContentType, CreateContentType};
use crate::registry::ModelHandle;

/// Descriptor for a registered content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDescriptor {
    /// Application the model belongs to.
    pub app_label: String,

    /// Model name within the application.
    pub model: String,
}

/// A registry entry: descriptor plus the model handle it resolves to.
///
/// Every entry carries its handle, so resolving a handle from a known
/// content type cannot fail.
#[derive(Clone)]
pub struct RegisteredModel {
    pub descriptor: ContentTypeDescriptor,
    pub handle: Arc<dyn ModelHandle>,
}

/// Registry of content types.
///
/// Cheap to clone; all clones share the same entries.
#[derive(Clone, Default)]
pub struct ContentTypeRegistry {
    inner: Arc<ContentTypeRegistryInner>,
}

#[derive(Default)]
struct ContentTypeRegistryInner {
    entries: DashMap<(String, String), RegisteredModel>,
}

impl ContentTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model handle under its (app_label, model) identity.
    ///
    /// Re-registering the same pair replaces the previous handle.
    pub fn register(&self, handle: Arc<dyn ModelHandle>) {
        let meta = handle.meta().clone();
        let descriptor = ContentTypeDescriptor {
            app_label: meta.app_label.clone(),
            model: meta.model.clone(),
        };

        info!(
            app_label = %descriptor.app_label,
            model = %descriptor.model,
            "registered content type"
        );

        self.inner.entries.insert(
            (meta.app_label, meta.model),
            RegisteredModel { descriptor, handle },
        );
    }

    /// Get a registry entry by (app_label, model). Matching is exact.
    pub fn get(&self, app_label: &str, model: &str) -> Option<RegisteredModel> {
        self.inner
            .entries
            .get(&(app_label.to_string(), model.to_string()))
            .map(|r| r.clone())
    }

    /// Check if a content type is registered.
    pub fn exists(&self, app_label: &str, model: &str) -> bool {
        self.inner
            .entries
            .contains_key(&(app_label.to_string(), model.to_string()))
    }

    /// List all registered descriptors.
    pub fn descriptors(&self) -> Vec<ContentTypeDescriptor> {
        self.inner
            .entries
            .iter()
            .map(|r| r.value().descriptor.clone())
            .collect()
    }

    /// Get the number of registered content types.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Remove a registered content type.
    pub fn invalidate(&self, app_label: &str, model: &str) {
        self.inner
            .entries
            .remove(&(app_label.to_string(), model.to_string()));
    }

    /// Remove all registered content types.
    pub fn clear(&self) {
        self.inner.entries.clear();
    }

    /// Mirror registered content types to the database.
    ///
    /// Upserts one `content_type` row per registered model, then warns
    /// about rows left behind by models no longer registered.
    pub async fn sync(&self, pool: &PgPool) -> Result<()> {
        let mut synced = 0;

        // Snapshot first so no map guard is held across an await.
        for descriptor in self.descriptors() {
            ContentType::upsert(
                pool,
                CreateContentType {
                    app_label: descriptor.app_label,
                    model: descriptor.model,
                },
            )
            .await?;
            synced += 1;
        }

        for row in ContentType::list(pool).await? {
            if !self.exists(&row.app_label, &row.model) {
                warn!(
                    app_label = %row.app_label,
                    model = %row.model,
                    "content type row has no registered model"
                );
            }
        }

        info!(count = synced, "content types synced");
        Ok(())
    }
}
