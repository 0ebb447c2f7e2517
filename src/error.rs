//! Error types for the license tracker.

use thiserror::Error;

/// Errors reported by the store, the session gate and input validation.
///
/// Missing references (unknown manufacturer, row or column ids) are *not* errors on
/// the store's remove/update paths; those report [`crate::Outcome::NotFound`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("only admins can {action}")]
    Unauthorized { action: String },
    #[error("wrong password")]
    WrongPassword,
    #[error("manufacturer not found: {0}")]
    ManufacturerNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
