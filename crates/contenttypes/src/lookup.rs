//! Generic-relation lookups.
//!
//! Resolves (app_label, model) to a content type, the model handle
//! behind it, and finally a single record by numeric id. The two
//! "not found" conditions surface as the uniform application error
//! with a descriptive message; storage errors propagate unchanged.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::registry::{
    ContentTypeDescriptor, ContentTypeRegistry, Instance, ModelHandle, RegisteredModel,
};

/// Lookup service over a content type registry.
///
/// Cheap to clone; shares the registry with all clones.
#[derive(Clone)]
pub struct GenericLookup {
    registry: ContentTypeRegistry,
}

impl GenericLookup {
    pub fn new(registry: ContentTypeRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a content type descriptor by (app_label, model).
    pub fn content_type(&self, app_label: &str, model: &str) -> AppResult<ContentTypeDescriptor> {
        Ok(self.entry(app_label, model)?.descriptor)
    }

    /// Resolve the model handle for (app_label, model).
    ///
    /// Delegates to the same registry entry that backs
    /// [`content_type`](Self::content_type); a known content type
    /// always has a handle.
    pub fn model(&self, app_label: &str, model: &str) -> AppResult<Arc<dyn ModelHandle>> {
        Ok(self.entry(app_label, model)?.handle)
    }

    /// Fetch a single record by id through the resolved model handle.
    pub async fn instance(
        &self,
        app_label: &str,
        model: &str,
        object_id: i64,
    ) -> AppResult<Instance> {
        let handle = self.model(app_label, model)?;
        let found = handle.get(object_id).await?;

        found.ok_or_else(|| {
            AppError::app(format!("{model} Object with id {object_id} does not exists"))
        })
    }

    fn entry(&self, app_label: &str, model: &str) -> AppResult<RegisteredModel> {
        self.registry
            .get(app_label, model)
            .ok_or_else(|| AppError::app(format!("Invalid Content Type ({app_label}:{model})")))
    }
}
