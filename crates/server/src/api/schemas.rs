use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pictor_index::ImageRecord;

/// One image as presented over the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageBody {
    /// Record identifier.
    pub id: String,
    /// Client-supplied display name.
    #[schema(example = "holiday.png")]
    pub name: String,
    /// Retrieval URL for the stored content.
    #[schema(example = "http://localhost:3001/uploads/img-0192e4a1.png")]
    pub url: String,
    /// Size in bytes.
    #[schema(example = 10240)]
    pub size: u64,
    /// When the image was uploaded.
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
}

/// Successful upload response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    #[schema(example = "Image uploaded successfully")]
    pub message: String,
    /// The stored image.
    pub image: ImageBody,
}

/// Catalog listing response, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListImagesResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Number of images in the catalog.
    pub count: usize,
    /// Images ordered by upload time, most recent first.
    pub images: Vec<ImageBody>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
    /// Metadata index reachability: `"ok"` or `"unavailable"`.
    #[schema(example = "ok")]
    pub index: String,
}

/// Error payload returned on validation and storage failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` on the failure path.
    pub success: bool,
    /// What went wrong.
    pub error: String,
}

/// Build the retrieval URL for a stored name.
///
/// A pure projection: never persisted, always derived at response time, so
/// changing the public base address requires no rewrite of stored records.
pub fn image_url(public_url: &str, stored_name: &str) -> String {
    format!("{}/uploads/{stored_name}", public_url.trim_end_matches('/'))
}

/// Project a persisted record into its API representation.
pub fn image_body(record: &ImageRecord, public_url: &str) -> ImageBody {
    ImageBody {
        id: record.id.clone(),
        name: record.original_name.clone(),
        url: image_url(public_url, &record.stored_name),
        size: record.size_bytes,
        uploaded_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_joins_base_and_name() {
        assert_eq!(
            image_url("http://localhost:3001", "img-1.png"),
            "http://localhost:3001/uploads/img-1.png"
        );
    }

    #[test]
    fn image_url_tolerates_trailing_slash() {
        assert_eq!(
            image_url("https://images.example.com/", "img-1.png"),
            "https://images.example.com/uploads/img-1.png"
        );
    }
}
