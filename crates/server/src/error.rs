use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use beamdrop_core::TokenError;
use beamdrop_store::StoreError;

use crate::api::schemas::ErrorResponse;
use crate::qr::EncodeError;

/// Body returned for every token denial, regardless of the internal reason.
/// The caller learns only that access was denied; the reason is logged.
const DENIAL_MESSAGE: &str = "access denied or link expired";

/// Request-scoped errors surfaced through the HTTP API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required upload field was missing.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The requested expiry window was not a positive integer minute count.
    #[error("invalid expiryMinutes value: {0:?}")]
    InvalidExpiry(String),

    /// The upload body could not be parsed as multipart form data.
    #[error("malformed upload body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// Token verification failed; the specific reason stays internal.
    #[error("download denied")]
    Denied(#[source] TokenError),

    /// The claim verified but its blob no longer resolves to a readable file.
    #[error("file not found")]
    NotFound,

    /// Token issuance failed.
    #[error("token signing failed")]
    Signing(#[source] TokenError),

    /// QR rendering of the download link failed.
    #[error("link encoding failed")]
    Encoding(#[from] EncodeError),

    /// The blob store failed to persist the upload.
    #[error("storage failed")]
    Store(#[from] StoreError),

    /// I/O failure while opening or streaming a blob.
    #[error("delivery failed")]
    Delivery(#[source] std::io::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidExpiry(_) | Self::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Denied(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Signing(_) | Self::Encoding(_) | Self::Store(_) | Self::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the specific reason before shaping the caller-visible response.
        match &self {
            Self::Denied(reason) => {
                tracing::warn!(%reason, "download denied");
            }
            Self::MissingField(_) | Self::InvalidExpiry(_) | Self::Multipart(_) => {
                tracing::warn!(error = %self, "upload rejected");
            }
            Self::NotFound => {
                tracing::warn!("requested blob is gone");
            }
            Self::Signing(reason) => {
                tracing::error!(%reason, "token signing failed");
            }
            Self::Encoding(_) | Self::Store(_) | Self::Delivery(_) => {
                tracing::error!(error = ?self, "request failed");
            }
        }

        let message = match &self {
            Self::Denied(_) => DENIAL_MESSAGE.to_owned(),
            Self::Signing(_) | Self::Encoding(_) | Self::Store(_) | Self::Delivery(_) => {
                "internal server error".to_owned()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(ErrorResponse { error: message }),
        )
            .into_response()
    }
}
