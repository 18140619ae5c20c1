use serde::{Deserialize, Serialize};

/// Payload signed into a download token.
///
/// The blob is referenced by an opaque store id rather than a filesystem
/// path, so decoding the (unencrypted) payload segment reveals nothing about
/// the server's disk layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Requester identifier (the uploading user).
    pub sub: String,
    /// Opaque blob id assigned by the store.
    pub file_id: String,
    /// File name the download should be delivered under, preserved verbatim
    /// from the upload.
    pub name: String,
    /// Expiry (seconds since epoch). The token is rejected at or after this
    /// instant.
    pub exp: u64,
}
