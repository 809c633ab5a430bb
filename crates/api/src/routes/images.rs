//! Image routes.
//!
//! Thin glue over the object service: multipart decoding on the way in,
//! headers and JSON on the way out.

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;
use imgstore_core::{BlobStore, ObjectId, StoredObject, object::DEFAULT_CONTENT_TYPE};
use imgstore_shared::AppError;
use serde::Serialize;
use tracing::warn;

use crate::{AppState, error::ApiError};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Creates the image routes, mounted under `/image`.
pub fn routes<S: BlobStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(list_images::<S>).post(upload_image::<S>))
        .route("/{file_id}", get(get_image::<S>).delete(delete_image::<S>))
}

// ============================================================================
// Upload decoding
// ============================================================================

/// What the multipart body contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upload {
    /// A file under the `image` field.
    Valid {
        /// File contents.
        bytes: Bytes,
        /// Client filename.
        filename: String,
        /// Client MIME type, or `application/octet-stream`.
        content_type: String,
    },
    /// No `image` field at all.
    Missing,
    /// An `image` field that is plain text rather than a file.
    WrongShape,
}

/// Reads the form until the `image` field; other fields are skipped.
async fn decode_upload(mut multipart: Multipart) -> Result<Upload, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            return Ok(Upload::WrongShape);
        };
        let content_type = field
            .content_type()
            .map_or_else(|| DEFAULT_CONTENT_TYPE.to_string(), str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Upload::Valid {
            bytes,
            filename,
            content_type,
        });
    }
    Ok(Upload::Missing)
}

fn multipart_error(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError(AppError::PayloadTooLarge(err.body_text()))
    } else {
        ApiError(AppError::Validation(err.body_text()))
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for a stored image.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Always true.
    pub success: bool,
    /// Human-readable status.
    pub message: &'static str,
    /// Identifier to fetch the image with.
    pub file_id: ObjectId,
    /// Filename as uploaded.
    pub filename: String,
    /// Payload size in bytes.
    pub size: usize,
}

/// Response for the image listing.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Every stored image, unordered.
    pub images: Vec<ObjectId>,
}

/// Response for a deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always true.
    pub success: bool,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// `Content-Disposition` value for an arbitrary stored filename.
///
/// The stored name is untouched; only the header copy is reduced to
/// printable ASCII without quotes or backslashes.
fn content_disposition(filename: &str) -> HeaderValue {
    let safe: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    HeaderValue::from_str(&format!("inline; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"))
}

fn image_response(obj: StoredObject) -> Response {
    let content_type = HeaderValue::from_str(&obj.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, content_disposition(&obj.filename)),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        obj.bytes,
    )
        .into_response()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/image`
/// Store the `image` field of a multipart form.
async fn upload_image<S: BlobStore + 'static>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected non-multipart upload");
            return Ok(ApiError::custom(
                StatusCode::BAD_REQUEST,
                "invalid_upload",
                &rejection.body_text(),
            ));
        }
    };

    let upload = decode_upload(multipart)
        .await
        .map_err(|e| multipart_error(&e))?;

    let Upload::Valid {
        bytes,
        filename,
        content_type,
    } = upload
    else {
        return Ok(ApiError::custom(
            StatusCode::BAD_REQUEST,
            "no_image",
            "No image provided or invalid image format",
        ));
    };

    let size = bytes.len();
    let file_id = state
        .objects
        .store(bytes, &filename, &content_type)
        .await?;

    Ok((
        StatusCode::OK,
        Json(UploadResponse {
            success: true,
            message: "Image saved successfully",
            file_id,
            filename,
            size,
        }),
    )
        .into_response())
}

/// GET `/image`
/// List every stored image identifier.
async fn list_images<S: BlobStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<ListResponse>, ApiError> {
    let images = state.objects.list_all().await?;
    Ok(Json(ListResponse { images }))
}

/// GET `/image/{file_id}`
/// Serve the stored bytes with their content type.
async fn get_image<S: BlobStore + 'static>(
    State(state): State<AppState<S>>,
    Path(file_id): Path<String>,
) -> Result<Response, ApiError> {
    let obj = state.objects.retrieve(&file_id).await?;
    Ok(image_response(obj))
}

/// DELETE `/image/{file_id}`
async fn delete_image<S: BlobStore + 'static>(
    State(state): State<AppState<S>>,
    Path(file_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.objects.delete(&file_id).await?;
    Ok(Json(DeleteResponse { success: true }))
}
