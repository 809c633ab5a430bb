//! In-process blob store.

use std::collections::HashMap;
use std::sync::RwLock;

use bytes::Bytes;

use super::blob::{Blob, BlobMetadata, BlobStore};
use super::error::StorageError;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Blobs are held behind a `RwLock`;
/// `Bytes` bodies are reference-counted so reads do not copy payloads.
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Blob>>,
}

impl MemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, data: Bytes, metadata: BlobMetadata) -> Result<(), StorageError> {
        let mut map = self.blobs.write().expect("lock poisoned");
        if map.contains_key(key) {
            return Err(StorageError::already_exists(key));
        }
        map.insert(key.to_string(), Blob { data, metadata });
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Blob>, StorageError> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let mut map = self.blobs.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.keys().cloned().collect())
    }
}

impl std::fmt::Debug for MemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBlobStore")
            .field("blob_count", &self.len())
            .finish()
    }
}
