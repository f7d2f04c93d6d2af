//! Database models.

pub mod content_type;

pub use content_type::{ContentType, CreateContentType};
