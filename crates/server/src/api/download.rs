use std::io::ErrorKind;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tokio_util::io::ReaderStream;
use tracing::info;

use crate::error::ApiError;

use super::AppState;
use super::schemas::ErrorResponse;

/// `GET /download/{token}` -- verify a token and stream its file.
///
/// Verification is pure (signature plus expiry); only a verified claim
/// touches the filesystem. A verified claim whose blob is gone is a 404, not
/// a denial. Once streaming has started, an I/O failure surfaces to the
/// client as transport-level truncation; nothing is retried.
#[utoipa::path(
    get,
    path = "/download/{token}",
    tag = "Transfer",
    summary = "Download a file",
    params(
        ("token" = String, Path, description = "Signed download token")
    ),
    responses(
        (status = 200, description = "File bytes, delivered under the original name"),
        (status = 403, description = "Token malformed, tampered, or expired", body = ErrorResponse),
        (status = 404, description = "Token valid but the file is gone", body = ErrorResponse),
        (status = 500, description = "I/O failure before streaming started", body = ErrorResponse)
    )
)]
pub async fn download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let claim = state.signer.verify(&token).map_err(ApiError::Denied)?;

    let path = state
        .store
        .resolve(&claim.file_id)
        .ok_or(ApiError::NotFound)?;

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(ApiError::NotFound),
        Err(e) => return Err(ApiError::Delivery(e)),
    };
    let length = file.metadata().await.map_err(ApiError::Delivery)?.len();

    info!(
        requester = %claim.sub,
        file_id = %claim.file_id,
        name = %claim.name,
        length,
        "delivering file"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, length)
        .header(header::CONTENT_DISPOSITION, attachment_header(&claim.name))
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| ApiError::Delivery(std::io::Error::other(e)))
}

/// Build a `Content-Disposition` attachment value carrying the claim's
/// display name. The quoted fallback is sanitized to ASCII; the full name
/// travels percent-encoded in `filename*` so non-ASCII names survive.
fn attachment_header(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(name, NON_ALPHANUMERIC);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(
            attachment_header("report.pdf"),
            "attachment; filename=\"report.pdf\"; filename*=UTF-8''report%2Epdf"
        );
    }

    #[test]
    fn quotes_and_controls_are_sanitized_in_the_fallback() {
        let header = attachment_header("we\"ird\nname.txt");
        assert!(header.starts_with("attachment; filename=\"we_ird_name.txt\""));
    }

    #[test]
    fn non_ascii_names_survive_in_the_extended_parameter() {
        let header = attachment_header("r\u{e9}sum\u{e9}.pdf");
        assert!(header.contains("filename*=UTF-8''r%C3%A9sum%C3%A9%2Epdf"));
    }
}
