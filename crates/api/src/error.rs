//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use imgstore_core::ObjectError;
use imgstore_shared::AppError;
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{"error": ..., "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Error with an explicit code and message, for cases `AppError` does not name.
    pub fn custom(status: StatusCode, code: &'static str, message: &str) -> Response {
        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ObjectError> for ApiError {
    fn from(err: ObjectError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        Self::custom(status, self.0.error_code(), &self.0.public_message())
    }
}
