//! Single-object framing for backends without native metadata.
//!
//! Layout: `MAGIC | header_len: u32 BE | header JSON | body`. The header
//! carries the content type and filename so that the whole object is still
//! written by one put.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use super::blob::{Blob, BlobMetadata};
use super::error::StorageError;

const MAGIC: &[u8; 8] = b"IMGSTOR\x01";
const LEN_BYTES: usize = 4;

#[derive(Serialize, Deserialize)]
struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
}

/// Returns true if `data` starts with the envelope magic.
pub(super) fn is_envelope(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

/// Frames `body` together with its metadata.
pub(super) fn encode(metadata: &BlobMetadata, body: &[u8]) -> Result<Bytes, StorageError> {
    let header = serde_json::to_vec(&Header {
        content_type: metadata.content_type.clone(),
        filename: metadata.filename.clone(),
    })
    .map_err(|e| StorageError::operation(format!("envelope header: {e}")))?;
    let header_len = u32::try_from(header.len())
        .map_err(|_| StorageError::operation("envelope header too large"))?;

    let mut buf = BytesMut::with_capacity(MAGIC.len() + LEN_BYTES + header.len() + body.len());
    buf.put_slice(MAGIC);
    buf.put_u32(header_len);
    buf.put_slice(&header);
    buf.put_slice(body);
    Ok(buf.freeze())
}

/// Splits an envelope back into body and metadata without copying the body.
pub(super) fn decode(key: &str, data: &Bytes) -> Result<Blob, StorageError> {
    if !is_envelope(data) {
        return Err(StorageError::corrupt(key, "missing envelope magic"));
    }
    let len_start = MAGIC.len();
    let header_start = len_start + LEN_BYTES;
    let len_bytes: [u8; LEN_BYTES] = data
        .get(len_start..header_start)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| StorageError::corrupt(key, "truncated envelope length"))?;
    let header_len = usize::try_from(u32::from_be_bytes(len_bytes))
        .map_err(|_| StorageError::corrupt(key, "envelope length overflow"))?;
    let body_start = header_start
        .checked_add(header_len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| StorageError::corrupt(key, "truncated envelope header"))?;

    let header: Header = serde_json::from_slice(&data[header_start..body_start])
        .map_err(|e| StorageError::corrupt(key, format!("envelope header: {e}")))?;

    Ok(Blob {
        data: data.slice(body_start..),
        metadata: BlobMetadata {
            content_type: header.content_type,
            filename: header.filename,
        },
    })
}
