//! Object types.

use bytes::Bytes;

use crate::storage::BlobMetadata;

/// Content type reported when none was stored.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Filename reported when none was stored.
pub const DEFAULT_FILENAME: &str = "image";

/// An object as handed back by `retrieve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Exact bytes originally stored.
    pub bytes: Bytes,
    /// Client-supplied filename, or [`DEFAULT_FILENAME`].
    pub filename: String,
    /// Client-supplied MIME type, or [`DEFAULT_CONTENT_TYPE`].
    pub content_type: String,
}

impl StoredObject {
    /// Assemble an object from a blob, filling in missing metadata.
    ///
    /// Empty strings count as missing.
    pub(crate) fn from_parts(bytes: Bytes, metadata: BlobMetadata) -> Self {
        Self {
            bytes,
            filename: non_empty(metadata.filename).unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            content_type: non_empty(metadata.content_type)
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        }
    }

    /// Size of the payload in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Metadata for a new object. Empty strings are not stored.
pub(crate) fn upload_metadata(filename: &str, content_type: &str) -> BlobMetadata {
    BlobMetadata {
        content_type: non_empty(Some(content_type.to_string())),
        filename: non_empty(Some(filename.to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
