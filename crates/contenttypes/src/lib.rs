//! Reperto content-type registry.
//!
//! Identifies models by (app_label, model) and resolves generic
//! relations: a content type, the model handle behind it, and finally
//! a single record by numeric id. Registered content types are mirrored
//! to the `content_type` table so other subsystems can reference them.

pub mod config;
pub mod db;
pub mod error;
pub mod lookup;
pub mod models;
pub mod registry;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use lookup::GenericLookup;
pub use registry::{
    ContentTypeDescriptor, ContentTypeRegistry, Instance, ModelHandle, ModelMeta, RegisteredModel,
    TableModel,
};
