use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::schemas::{ErrorResponse, ListImagesResponse, image_body};

/// `GET /api/images` -- list the full catalog, newest first.
///
/// Backend failures answer with a generic message; the detail goes to the
/// server log only.
#[utoipa::path(
    get,
    path = "/api/images",
    tag = "Images",
    summary = "List images",
    description = "Returns every stored image with its retrieval URL, ordered by upload time descending.",
    responses(
        (status = 200, description = "Catalog of stored images", body = ListImagesResponse),
        (status = 500, description = "Index failure", body = ErrorResponse)
    )
)]
pub async fn list_images(State(state): State<AppState>) -> impl IntoResponse {
    match state.index.list_all().await {
        Ok(records) => {
            let images: Vec<_> = records
                .iter()
                .map(|record| image_body(record, &state.public_url))
                .collect();
            let body = ListImagesResponse {
                success: true,
                count: images.len(),
                images,
            };
            (StatusCode::OK, Json(serde_json::json!(body)))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list images");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!(ErrorResponse {
                    success: false,
                    error: "Failed to fetch images".into(),
                })),
            )
        }
    }
}
