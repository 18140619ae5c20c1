use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::schemas::HealthResponse;

/// Fixed acknowledgement for `GET /` so a scanner or probe can tell the
/// service is reachable.
const LIVENESS_MESSAGE: &str = "beamdrop is up";

/// `GET /` -- plain-text liveness probe.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Service is reachable", body = String)
    )
)]
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_MESSAGE)
}

/// `GET /health` -- returns service status as JSON.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}
