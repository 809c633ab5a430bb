//! Object store access layer for imgstore.
//!
//! This crate owns everything between a decoded upload and the durable blob
//! store. It has ZERO web dependencies.
//!
//! # Modules
//!
//! - `id` - Identifier generation and validation
//! - `storage` - Blob store capability and its backends (OpenDAL, in-memory)
//! - `object` - The access layer: store, retrieve, delete, list

pub mod id;
pub mod object;
pub mod storage;

pub use imgstore_shared::ObjectId;
pub use object::{ObjectError, ObjectService, StoredObject};
pub use storage::{BlobStore, MemoryBlobStore, StorageError, StorageService};
