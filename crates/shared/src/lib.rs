//! Shared identifiers, errors, and configuration for imgstore.
//!
//! This crate provides common types used across all other crates:
//! - `ObjectId`, the client-visible reference to a stored object
//! - Application-wide error types with HTTP status mapping
//! - Configuration management (server and storage backend)

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ServerConfig, StorageProvider};
pub use error::{AppError, AppResult};
pub use types::{IdParseError, ObjectId};
