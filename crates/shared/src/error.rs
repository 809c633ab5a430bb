//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (malformed identifier, missing upload).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body too large.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Blob store error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::Storage(_) => "storage_error",
        }
    }

    /// Message safe to show to clients.
    ///
    /// Storage failures are not echoed back; their details only go to the
    /// logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) => "Storage operation failed".to_string(),
            Self::NotFound(msg) | Self::Validation(msg) | Self::PayloadTooLarge(msg) => {
                msg.clone()
            }
        }
    }
}
