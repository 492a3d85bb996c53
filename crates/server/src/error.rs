use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use pictor_blob::BlobError;
use pictor_core::UploadError;
use pictor_index::IndexError;

/// Errors that can occur when running the Pictor server.
///
/// Validation failures carry their message through verbatim (they are
/// client-caused and safe to show); storage and index failures are logged in
/// full server-side and answered with a generic message so internal paths and
/// connection strings never reach the response body.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Upload validation failed.
    #[error(transparent)]
    Validation(#[from] UploadError),

    /// The multipart body could not be read (malformed framing, body over
    /// the transport limit, client disconnect).
    #[error("multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// The blob store failed to persist the content.
    #[error(transparent)]
    Blob(#[from] BlobError),

    /// The metadata index failed or is unreachable.
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // The no-file case keeps the bare `{error}` shape clients key on.
            Self::Validation(UploadError::MissingPayload) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": UploadError::MissingPayload.to_string() }),
            ),
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "success": false, "error": e.to_string() }),
            ),
            Self::Multipart(e) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "success": false, "error": e.to_string() }),
            ),
            Self::Blob(e) => {
                tracing::error!(error = %e, "blob write failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "success": false, "error": "Failed to store image" }),
                )
            }
            Self::Index(e) => {
                tracing::error!(error = %e, "index operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "success": false, "error": "Failed to save image metadata" }),
                )
            }
            Self::Config(e) => {
                tracing::error!(error = %e, "configuration error surfaced in request path");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "success": false, "error": "Something went wrong" }),
                )
            }
            Self::Io(e) => {
                tracing::error!(error = %e, "io error surfaced in request path");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "success": false, "error": "Something went wrong" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
