use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use tracing::{info, warn};

use pictor_core::UploadError;
use pictor_index::NewImage;

use crate::error::ServerError;

use super::AppState;
use super::schemas::{ErrorResponse, UploadResponse, image_body};

/// `POST /api/upload` -- validate and persist a single uploaded image.
///
/// The pipeline is a strict two-phase sequence: validation (no side effects
/// on rejection), then blob write, then index insert. An index entry never
/// references a blob that was not written; the reverse — a blob whose insert
/// failed — is tolerated, logged, and cleaned up best-effort.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Images",
    summary = "Upload image",
    description = "Accepts a multipart body with a single file field, stores the content, and records it in the catalog. Allowed types: JPEG, PNG, GIF, WEBP. Default size ceiling: 5 MiB.",
    responses(
        (status = 201, description = "Image stored and indexed", body = UploadResponse),
        (status = 400, description = "Validation failure (type, size, or missing file)", body = ErrorResponse),
        (status = 500, description = "Storage or index failure", body = ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ServerError> {
    // Fail fast: don't write a blob against an index that is already down.
    state.index.ping().await?;

    let (original_name, content_type, data) = read_file_part(&state, multipart).await?;

    let blob = state.blob.put(&original_name, data).await?;

    let new_image = NewImage {
        stored_name: blob.stored_name.clone(),
        original_name,
        storage_path: blob.storage_path,
        size_bytes: blob.size_bytes,
        content_type,
    };

    let record = match state.index.insert(new_image).await {
        Ok(record) => record,
        Err(e) => {
            // The blob is already durable; without its index row it is
            // unreachable garbage. Remove it best-effort and surface the
            // insert failure.
            warn!(
                stored_name = %blob.stored_name,
                error = %e,
                "index insert failed after blob write, removing orphaned blob"
            );
            if let Err(delete_err) = state.blob.delete(&blob.stored_name).await {
                warn!(
                    stored_name = %blob.stored_name,
                    error = %delete_err,
                    "orphaned blob could not be removed, leaving for reconciliation"
                );
            }
            return Err(ServerError::Index(e));
        }
    };

    info!(
        id = %record.id,
        stored_name = %record.stored_name,
        size_bytes = record.size_bytes,
        content_type = %record.content_type,
        "image uploaded"
    );

    let body = UploadResponse {
        success: true,
        message: "Image uploaded successfully".into(),
        image: image_body(&record, &state.public_url),
    };

    Ok((StatusCode::CREATED, Json(body)))
}

/// Pull the first file part out of the multipart body, validating its
/// declared content type before buffering and its size after.
///
/// Parts without a filename are skipped; a body with no file part at all is
/// `MissingPayload`. The declared content type decides acceptance — the
/// filename extension is never trusted for that.
async fn read_file_part(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(String, String, Bytes), ServerError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(original_name) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        state.policy.check_content_type(&content_type)?;

        let data = field.bytes().await?;
        state.policy.check_size(data.len() as u64)?;

        return Ok((original_name, content_type, data));
    }

    Err(ServerError::Validation(UploadError::MissingPayload))
}
