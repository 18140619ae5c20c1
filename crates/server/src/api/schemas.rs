use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response to a successful upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Absolute, token-bearing download URL.
    #[schema(example = "http://192.168.1.7:3002/download/eyJhb...")]
    pub download_url: String,
    /// Self-contained PNG data URI rendering `download_url` as a QR code.
    #[schema(example = "data:image/png;base64,iVBOR...")]
    pub qr_code_url: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
}

/// Generic error response returned on failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    #[schema(example = "access denied or link expired")]
    pub error: String,
}
