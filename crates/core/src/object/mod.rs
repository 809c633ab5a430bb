//! Object store access layer.
//!
//! Orchestrates store, retrieve, delete, and list against a [`BlobStore`]:
//! - Identifier generation for new objects
//! - Identifier validation before any lookup
//! - Metadata association (filename, content type)
//!
//! [`BlobStore`]: crate::storage::BlobStore

mod error;
mod service;
mod types;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod service_tests;

pub use error::ObjectError;
pub use service::ObjectService;
pub use types::{DEFAULT_CONTENT_TYPE, DEFAULT_FILENAME, StoredObject};
