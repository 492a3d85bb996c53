pub mod health;
pub mod images;
pub mod openapi;
pub mod schemas;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pictor_blob::BlobStore;
use pictor_core::UploadPolicy;
use pictor_index::ImageIndex;

use self::openapi::ApiDoc;

/// Headroom on top of the payload ceiling for multipart framing (boundaries,
/// part headers) so a file exactly at the ceiling still parses.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Durable byte storage for uploaded content.
    pub blob: Arc<dyn BlobStore>,
    /// Metadata index for upload records.
    pub index: Arc<dyn ImageIndex>,
    /// Ingress validation policy (allow-list + size ceiling).
    pub policy: UploadPolicy,
    /// Public base address for retrieval URLs.
    pub public_url: String,
    /// Filesystem directory served at `/uploads` (None when the blob store
    /// has no filesystem presence, e.g. in tests against the memory store).
    pub uploads_dir: Option<String>,
}

/// Build the Axum router with all API routes, static retrieval, middleware,
/// and Swagger UI.
pub fn router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.policy.max_bytes() + MULTIPART_OVERHEAD_BYTES)
        .unwrap_or(usize::MAX);

    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/api/upload", post(upload::upload))
        .route("/api/images", get(images::list_images))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Static retrieval: raw bytes by stored name, 404 when absent.
    if let Some(ref dir) = state.uploads_dir {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
