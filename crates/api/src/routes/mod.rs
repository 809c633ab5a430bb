//! API route definitions.

use axum::Router;
use imgstore_core::BlobStore;

use crate::AppState;

pub mod gallery;
pub mod health;
pub mod images;

/// Creates the API router with all routes.
pub fn api_routes<S: BlobStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::routes::<S>())
        .merge(gallery::routes::<S>())
        .nest("/image", images::routes::<S>())
}
