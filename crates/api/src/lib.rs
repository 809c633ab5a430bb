//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Image routes (upload, fetch, list, delete)
//! - The gallery page
//! - Health check
//! - Error-to-response mapping

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use imgstore_core::{BlobStore, ObjectService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState<S: BlobStore> {
    /// Object store access layer.
    pub objects: ObjectService<S>,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl<S: BlobStore> AppState<S> {
    /// Create application state around a blob store.
    #[must_use]
    pub fn new(store: Arc<S>, max_upload_bytes: usize) -> Self {
        Self {
            objects: ObjectService::new(store),
            max_upload_bytes,
        }
    }
}

impl<S: BlobStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            objects: self.objects.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Creates the main application router.
pub fn create_router<S: BlobStore + 'static>(state: AppState<S>) -> Router {
    let body_limit = state.max_upload_bytes;
    routes::api_routes::<S>()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
