use std::time::Duration;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::info;

use crate::error::ApiError;
use crate::qr;

use super::AppState;
use super::schemas::{ErrorResponse, UploadResponse};

/// `POST /upload` -- spool a file and return a time-limited download link.
///
/// Multipart fields: `file` (content plus original filename), `username`
/// (requester identifier), `expiryMinutes` (positive integer validity
/// window). The response carries the absolute download URL and a QR data URI
/// of it.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Transfer",
    summary = "Upload a file",
    request_body(
        content = Vec<u8>,
        content_type = "multipart/form-data",
        description = "Fields: file, username, expiryMinutes"
    ),
    responses(
        (status = 200, description = "Download link issued", body = UploadResponse),
        (status = 400, description = "Missing or invalid upload field", body = ErrorResponse),
        (status = 500, description = "Signing, storage, or rendering failure", body = ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut username: Option<String> = None;
    let mut expiry_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        // Capture the owned name first: reading the field consumes it.
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let display_name = field.file_name().unwrap_or("download").to_owned();
                let bytes = field.bytes().await?;
                file = Some((display_name, bytes.to_vec()));
            }
            "username" => username = Some(field.text().await?),
            "expiryMinutes" => expiry_raw = Some(field.text().await?),
            _ => {}
        }
    }

    // Reject before any side effect: nothing is spooled and no token is
    // signed unless the whole request is well-formed.
    let (display_name, bytes) = file.ok_or(ApiError::MissingField("file"))?;
    let username = username
        .filter(|u| !u.trim().is_empty())
        .ok_or(ApiError::MissingField("username"))?;
    let expiry_raw = expiry_raw.ok_or(ApiError::MissingField("expiryMinutes"))?;
    let minutes = parse_expiry_minutes(&expiry_raw)?;

    let file_id = state.store.put(&bytes).await?;
    let token = state
        .signer
        .issue(
            &username,
            &file_id,
            &display_name,
            Duration::from_secs(minutes * 60),
        )
        .map_err(ApiError::Signing)?;

    let download_url = format!("{}/download/{token}", state.link_base());
    let qr_code_url = qr::data_uri(&download_url)?;

    info!(
        requester = %username,
        file_id = %file_id,
        name = %display_name,
        minutes,
        "issued download link"
    );

    Ok((
        StatusCode::OK,
        Json(UploadResponse {
            download_url,
            qr_code_url,
        }),
    ))
}

/// Longest accepted expiry window: one week.
const MAX_EXPIRY_MINUTES: u64 = 7 * 24 * 60;

/// Parse the requested expiry window.
///
/// Non-numeric and non-positive values are rejected outright rather than
/// flowing into the expiry arithmetic and producing an already-dead link.
/// Windows beyond [`MAX_EXPIRY_MINUTES`] are rejected too: a handoff link is
/// a short-lived credential, and the bound keeps the seconds conversion far
/// from overflow.
fn parse_expiry_minutes(raw: &str) -> Result<u64, ApiError> {
    match raw.trim().parse::<u64>() {
        Ok(minutes) if (1..=MAX_EXPIRY_MINUTES).contains(&minutes) => Ok(minutes),
        _ => Err(ApiError::InvalidExpiry(raw.to_owned())),
    }
}
