//! Blob store capability and backends.
//!
//! The access layer only ever talks to a [`BlobStore`]. Two backends exist:
//!
//! - [`StorageService`] on top of Apache OpenDAL, for S3-compatible stores
//!   (Cloudflare R2, AWS S3), Azure Blob Storage, the local filesystem, and
//!   process memory
//! - [`MemoryBlobStore`], a `HashMap` store for tests and embedding
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.write_with("key", data) │ op.stat("key")                     │
//! │ op.read("key")             │ op.list("/")                       │
//! │ op.delete("key")           │                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod blob;
mod envelope;
mod error;
mod memory;
mod service;

pub use blob::{Blob, BlobMetadata, BlobStore};
pub use error::StorageError;
pub use imgstore_shared::StorageProvider;
pub use memory::MemoryBlobStore;
pub use service::StorageService;
