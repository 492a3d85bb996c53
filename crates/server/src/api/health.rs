use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::schemas::HealthResponse;

/// `GET /health` -- returns service status and index reachability.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and whether the metadata index is reachable.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let index = match state.index.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "index ping failed");
            "unavailable"
        }
    };

    let body = HealthResponse {
        status: "ok".into(),
        index: index.into(),
    };

    (StatusCode::OK, Json(body))
}
