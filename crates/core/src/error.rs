use thiserror::Error;

/// Failures from issuing or verifying download tokens.
///
/// The three verification variants are deliberately distinct even though the
/// HTTP layer collapses them into one denial response: the specific reason is
/// what gets logged.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The JWT encoder itself failed while issuing a token.
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The presented string is not a well-formed token (wrong segment shape,
    /// undecodable payload).
    #[error("token is malformed")]
    Malformed,

    /// The signature matches none of the accepted secrets.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The signature is valid but the claim's expiry has passed.
    #[error("token has expired")]
    Expired,
}
