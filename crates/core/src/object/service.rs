//! Object service implementation.

use std::sync::Arc;

use bytes::Bytes;
use imgstore_shared::ObjectId;
use tracing::{debug, error, info, warn};

use super::error::ObjectError;
use super::types::{StoredObject, upload_metadata};
use crate::id;
use crate::storage::{BlobStore, StorageError};

/// Access layer over a blob store.
///
/// Holds nothing but the store handle; every operation is independent and
/// safe to run concurrently.
pub struct ObjectService<S: BlobStore> {
    store: Arc<S>,
}

impl<S: BlobStore> Clone for ObjectService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: BlobStore> ObjectService<S> {
    /// Create a new object service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store_handle(&self) -> &Arc<S> {
        &self.store
    }

    /// Store a new object and return its identifier.
    ///
    /// An empty payload is accepted. `filename` and `content_type` are passed
    /// through unchanged. The identifier is returned only once the write has
    /// succeeded; it is never retried here.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::StoreWriteFailed`] if the write fails for any
    /// reason, including the (astronomically unlikely) case of a freshly
    /// generated identifier that is already taken.
    pub async fn store(
        &self,
        payload: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<ObjectId, ObjectError> {
        let id = id::generate();
        let size = payload.len();

        match self
            .store
            .put(&id.key(), payload, upload_metadata(filename, content_type))
            .await
        {
            Ok(()) => {
                info!(object_id = %id, size, filename, content_type, "Stored object");
                Ok(id)
            }
            Err(e) => {
                if matches!(e, StorageError::AlreadyExists { .. }) {
                    error!(object_id = %id, "Generated identifier already in use");
                } else {
                    warn!(object_id = %id, error = %e, "Failed to store object");
                }
                Err(ObjectError::StoreWriteFailed(e))
            }
        }
    }

    /// Fetch an object by a client-supplied identifier.
    ///
    /// # Errors
    ///
    /// - [`ObjectError::Malformed`] if `id` is not a UUID (the store is not
    ///   consulted)
    /// - [`ObjectError::NotFound`] if nothing is stored under `id`
    /// - [`ObjectError::StoreReadFailed`] if the store read fails
    pub async fn retrieve(&self, id: &str) -> Result<StoredObject, ObjectError> {
        let id = id::parse(id)?;

        let blob = self
            .store
            .get(&id.key())
            .await
            .map_err(ObjectError::StoreReadFailed)?
            .ok_or_else(|| ObjectError::not_found(id))?;

        debug!(object_id = %id, size = blob.data.len(), "Retrieved object");
        Ok(StoredObject::from_parts(blob.data, blob.metadata))
    }

    /// Delete an object by a client-supplied identifier.
    ///
    /// A second delete of the same identifier returns `NotFound`.
    ///
    /// # Errors
    ///
    /// - [`ObjectError::Malformed`] if `id` is not a UUID (the store is not
    ///   consulted)
    /// - [`ObjectError::NotFound`] if nothing was stored under `id`
    /// - [`ObjectError::StoreWriteFailed`] if the store delete fails
    pub async fn delete(&self, id: &str) -> Result<(), ObjectError> {
        let id = id::parse(id)?;

        let existed = self
            .store
            .delete(&id.key())
            .await
            .map_err(ObjectError::StoreWriteFailed)?;

        if existed {
            info!(object_id = %id, "Deleted object");
            Ok(())
        } else {
            debug!(object_id = %id, "Delete of absent object");
            Err(ObjectError::not_found(id))
        }
    }

    /// Every live identifier, in store order.
    ///
    /// Keys that are not identifiers (foreign files sharing the bucket) are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::StoreReadFailed`] if listing fails.
    pub async fn list_all(&self) -> Result<Vec<ObjectId>, ObjectError> {
        let keys = self
            .store
            .list()
            .await
            .map_err(ObjectError::StoreReadFailed)?;

        Ok(keys
            .into_iter()
            .filter_map(|key| match ObjectId::parse(&key) {
                Ok(id) => Some(id),
                Err(_) => {
                    debug!(key = %key, "Skipping non-object key");
                    None
                }
            })
            .collect())
    }
}

impl<S: BlobStore> std::fmt::Debug for ObjectService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectService").finish_non_exhaustive()
    }
}
