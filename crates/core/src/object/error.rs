//! Object error types.

use imgstore_shared::{AppError, ObjectId};
use thiserror::Error;

use crate::storage::StorageError;

/// Access layer errors.
///
/// `Malformed` and `NotFound` are expected, per-request outcomes and stay
/// distinct so callers can answer 400 and 404 respectively.
#[derive(Debug, Error)]
pub enum ObjectError {
    /// Client-supplied identifier is not a UUID. The store was not touched.
    #[error("malformed object identifier: {0:?}")]
    Malformed(String),

    /// Well-formed identifier with no stored object.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The underlying write did not complete; nothing was stored.
    #[error("store write failed: {0}")]
    StoreWriteFailed(#[source] StorageError),

    /// The underlying read, stat, or list failed.
    #[error("store read failed: {0}")]
    StoreReadFailed(#[source] StorageError),
}

impl ObjectError {
    /// Create a malformed identifier error.
    #[must_use]
    pub fn malformed(input: impl Into<String>) -> Self {
        Self::Malformed(input.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: ObjectId) -> Self {
        Self::NotFound(id)
    }
}

impl From<ObjectError> for AppError {
    fn from(err: ObjectError) -> Self {
        match err {
            ObjectError::Malformed(_) => Self::Validation("Invalid image id".to_string()),
            ObjectError::NotFound(_) => Self::NotFound("Image not found".to_string()),
            ObjectError::StoreWriteFailed(e) | ObjectError::StoreReadFailed(e) => {
                Self::Storage(e.to_string())
            }
        }
    }
}
