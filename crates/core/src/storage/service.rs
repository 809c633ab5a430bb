//! Blob store implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use tracing::debug;

use super::blob::{Blob, BlobMetadata, BlobStore};
use super::envelope;
use super::error::StorageError;
use imgstore_shared::StorageProvider;

/// User-metadata entry holding the original filename.
const FILENAME_KEY: &str = "filename";

/// Blob store backed by an OpenDAL operator.
///
/// Content type and filename go into the backend's native metadata when it
/// supports both and the values are plain ASCII (S3 and Azure carry user
/// metadata in HTTP headers). Otherwise the object is framed as an envelope,
/// so a put is always a single write.
pub struct StorageService {
    operator: Operator,
    provider_name: &'static str,
    native_metadata: bool,
    conditional_write: bool,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(provider: &StorageProvider) -> Result<Self, StorageError> {
        let operator = Self::create_operator(provider)?;
        Ok(Self::with_operator(operator, provider.name()))
    }

    /// Wrap an already-built operator.
    #[must_use]
    pub fn with_operator(operator: Operator, provider_name: &'static str) -> Self {
        let capability = operator.info().full_capability();
        Self {
            operator,
            provider_name,
            native_metadata: capability.write_with_content_type
                && capability.write_with_user_metadata,
            conditional_write: capability.write_with_if_not_exists,
        }
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);
                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );
                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
        };
        Ok(operator)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    /// Whether metadata is written natively rather than enveloped.
    #[must_use]
    pub fn uses_native_metadata(&self) -> bool {
        self.native_metadata
    }

    /// Check if a blob exists in storage.
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.operator.stat(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn native_metadata_of(&self, key: &str) -> Result<BlobMetadata, StorageError> {
        match self.operator.stat(key).await {
            Ok(meta) => Ok(BlobMetadata {
                content_type: meta.content_type().map(String::from),
                filename: meta
                    .user_metadata()
                    .and_then(|m| m.get(FILENAME_KEY).cloned()),
            }),
            // Deleted between read and stat; the body is all we have.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BlobMetadata::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl BlobStore for StorageService {
    async fn put(&self, key: &str, data: Bytes, metadata: BlobMetadata) -> Result<(), StorageError> {
        if !self.conditional_write && self.exists(key).await? {
            return Err(StorageError::already_exists(key));
        }

        let result = if writes_natively(self.native_metadata, &metadata, &data) {
            let mut write = self
                .operator
                .write_with(key, data)
                .if_not_exists(self.conditional_write);
            if let Some(content_type) = metadata.content_type.as_deref() {
                write = write.content_type(content_type);
            }
            write
                .user_metadata(
                    metadata
                        .filename
                        .map(|name| (FILENAME_KEY.to_string(), name)),
                )
                .await
        } else {
            let framed = envelope::encode(&metadata, &data)?;
            self.operator
                .write_with(key, framed)
                .if_not_exists(self.conditional_write)
                .await
        };

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::ConditionNotMatch => {
                Err(StorageError::already_exists(key))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Blob>, StorageError> {
        let data = match self.operator.read(key).await {
            Ok(buffer) => buffer.to_bytes(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if envelope::is_envelope(&data) {
            return envelope::decode(key, &data).map(Some);
        }

        let metadata = self.native_metadata_of(key).await?;
        Ok(Some(Blob { data, metadata }))
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        // Stat then delete; not atomic across concurrent callers.
        let existed = self.exists(key).await?;
        self.operator.delete(key).await?;
        Ok(existed)
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let entries = self.operator.list("/").await?;
        let keys: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.metadata().is_file())
            .map(|entry| entry.path().to_string())
            .collect();
        debug!(provider = self.provider_name, count = keys.len(), "Listed blobs");
        Ok(keys)
    }
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("provider", &self.provider_name)
            .field("native_metadata", &self.native_metadata)
            .field("conditional_write", &self.conditional_write)
            .finish_non_exhaustive()
    }
}

/// Whether a put can keep its metadata in the backend instead of an envelope.
///
/// Bodies that already start with the envelope magic are always framed, so a
/// read never takes client bytes for an envelope.
fn writes_natively(native_metadata: bool, metadata: &BlobMetadata, data: &[u8]) -> bool {
    native_metadata
        && !envelope::is_envelope(data)
        && metadata.content_type.as_deref().is_none_or(is_header_safe)
        && metadata.filename.as_deref().is_none_or(is_header_safe)
}

/// Printable ASCII without line breaks, safe to carry in an HTTP header.
fn is_header_safe(value: &str) -> bool {
    value.bytes().all(|b| (0x20..0x7f).contains(&b))
}
