//! Content type registry and model handles.
//!
//! This module provides:
//! - ContentTypeRegistry: in-memory registry of models keyed by
//!   (app_label, model), mirrored to the database by `sync`
//! - ModelHandle: storage access for one registered model
//! - TableModel: stock sqlx-backed handle over a single table

mod handle;
mod type_registry;

pub use handle::{Instance, ModelHandle, ModelMeta, TableModel};
pub use type_registry::{ContentTypeDescriptor, ContentTypeRegistry, RegisteredModel};
