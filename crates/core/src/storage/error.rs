//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A blob already exists under this key.
    #[error("object already exists: {key}")]
    AlreadyExists {
        /// Storage key that was taken.
        key: String,
    },

    /// Stored bytes could not be decoded.
    #[error("corrupt object {key}: {reason}")]
    Corrupt {
        /// Storage key of the damaged blob.
        key: String,
        /// What failed to decode.
        reason: String,
    },

    /// Operation not supported by the storage provider.
    #[error("operation not supported by storage provider: {0}")]
    Unsupported(String),

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Create an already exists error.
    #[must_use]
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }

    /// Create a corrupt object error.
    #[must_use]
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an operation error.
    #[must_use]
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::Unsupported => Self::Unsupported(err.to_string()),
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}
