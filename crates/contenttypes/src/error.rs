//! Application error types.

use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Uniform application error carrying a human-readable message.
    ///
    /// All domain-level "not found" conditions surface as this variant.
    #[error("{0}")]
    App(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build the uniform application error from a message.
    pub fn app(message: impl Into<String>) -> Self {
        AppError::App(message.into())
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
