use axum::Json;

use super::schemas::{ErrorResponse, HealthResponse, UploadResponse};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Beamdrop API",
        version = "0.1.0",
        description = "LAN file handoff: upload a file, get a signed time-limited download link and a QR code for it.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Transfer", description = "File upload and token-gated download")
    ),
    paths(
        super::health::root,
        super::health::health,
        super::upload::upload,
        super::download::download,
    ),
    components(schemas(UploadResponse, HealthResponse, ErrorResponse))
)]
pub struct ApiDoc;

/// `GET /api-doc/openapi.json` -- serve the generated OpenAPI document.
pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    Json(ApiDoc::openapi())
}
