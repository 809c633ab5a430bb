//! The blob store capability consumed by the access layer.

use bytes::Bytes;

use super::error::StorageError;

/// Metadata persisted alongside a blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobMetadata {
    /// MIME type, kept as store-native content type where supported.
    pub content_type: Option<String>,
    /// Original client filename, kept as custom metadata.
    pub filename: Option<String>,
}

/// A blob read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Raw bytes exactly as written.
    pub data: Bytes,
    /// Whatever metadata survived in the store.
    pub metadata: BlobMetadata,
}

/// Durable key-value blob store.
///
/// Implementations must satisfy these invariants:
/// - `put` is a single atomic write: after a failure no record exists.
/// - `put` never overwrites. An existing key yields
///   [`StorageError::AlreadyExists`].
/// - A successful `put` is visible to `get`, `delete`, and `list` as soon as
///   it returns.
pub trait BlobStore: Send + Sync {
    /// Write `data` under `key`.
    fn put(
        &self,
        key: &str,
        data: Bytes,
        metadata: BlobMetadata,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Read the blob under `key`. Returns `Ok(None)` if absent.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Blob>, StorageError>> + Send;

    /// Remove `key`. Returns `true` if the blob existed.
    ///
    /// Deleting an absent key is not an error. The existence check need not
    /// be atomic with the removal: two racing deletes of the same key may
    /// both report `true`.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<bool, StorageError>> + Send;

    /// Every key in the store. Bodies are not loaded.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<String>, StorageError>> + Send;
}
