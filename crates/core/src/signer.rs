use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::claim::Claim;
use crate::error::TokenError;

/// Issues and verifies signed download tokens.
///
/// Holds one encoding key and one or more decoding keys. The extra decoding
/// key supports secret rotation: restart the process with the old secret
/// demoted to "previous" and tokens signed before the rotation stay
/// verifiable until they expire. New tokens are always signed with the
/// current secret.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_keys: Vec<DecodingKey>,
}

impl TokenSigner {
    /// Build a signer over a single secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_keys: vec![DecodingKey::from_secret(secret.as_bytes())],
        }
    }

    /// Build a signer that signs with `secret` but also accepts signatures
    /// made with `previous` during verification.
    pub fn with_previous(secret: &str, previous: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_keys: vec![
                DecodingKey::from_secret(secret.as_bytes()),
                DecodingKey::from_secret(previous.as_bytes()),
            ],
        }
    }

    /// Issue a token granting access to `file_id` for `validity` from now.
    ///
    /// The claim's expiry is the issuance instant plus `validity`; callers
    /// are responsible for ensuring the window is positive before asking for
    /// a token. A window that would push the expiry past the epoch-seconds
    /// range saturates instead of wrapping into the past.
    pub fn issue(
        &self,
        requester: &str,
        file_id: &str,
        name: &str,
        validity: Duration,
    ) -> Result<String, TokenError> {
        let exp = jsonwebtoken::get_current_timestamp().saturating_add(validity.as_secs());
        let claim = Claim {
            sub: requester.to_owned(),
            file_id: file_id.to_owned(),
            name: name.to_owned(),
            exp,
        };

        encode(&Header::default(), &claim, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verify a token and recover its claim.
    ///
    /// Pure with respect to the filesystem: this checks shape, signature, and
    /// expiry only. Each decoding key is tried in turn; a non-signature
    /// failure from the first key is final, since later keys would fail the
    /// same way.
    pub fn verify(&self, token: &str) -> Result<Claim, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        for key in &self.decoding_keys {
            match decode::<Claim>(token, key, &validation) {
                Ok(data) => {
                    // jsonwebtoken accepts exp == now; the link contract is
                    // that the expiry instant itself is already stale.
                    if data.claims.exp <= jsonwebtoken::get_current_timestamp() {
                        return Err(TokenError::Expired);
                    }
                    return Ok(data.claims);
                }
                Err(e) => match classify(&e) {
                    TokenError::InvalidSignature => {}
                    other => return Err(other),
                },
            }
        }

        Err(TokenError::InvalidSignature)
    }
}

/// Map a JWT library error onto the verification taxonomy.
fn classify(e: &jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET)
    }

    fn issue_with_exp(secret: &str, exp: u64) -> String {
        let claim = Claim {
            sub: "alice".into(),
            file_id: "blob-1".into(),
            name: "report.pdf".into(),
            exp,
        };
        encode(
            &Header::default(),
            &claim,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_preserves_claim() {
        let s = signer();
        let token = s
            .issue("alice", "blob-1", "report.pdf", Duration::from_secs(300))
            .unwrap();

        let claim = s.verify(&token).unwrap();
        assert_eq!(claim.sub, "alice");
        assert_eq!(claim.file_id, "blob-1");
        assert_eq!(claim.name, "report.pdf");
        assert!(claim.exp > jsonwebtoken::get_current_timestamp());
    }

    #[test]
    fn token_has_three_segments() {
        let s = signer();
        let token = s
            .issue("alice", "blob-1", "report.pdf", Duration::from_secs(60))
            .unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn enormous_validity_saturates_instead_of_wrapping() {
        let s = signer();
        let token = s
            .issue("alice", "blob-1", "report.pdf", Duration::from_secs(u64::MAX))
            .unwrap();

        // A wrapped expiry would land in the past and fail verification.
        let claim = s.verify(&token).unwrap();
        assert_eq!(claim.exp, u64::MAX);
    }

    #[test]
    fn expired_token_is_rejected() {
        let past = jsonwebtoken::get_current_timestamp() - 30;
        let token = issue_with_exp(SECRET, past);

        assert!(matches!(signer().verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let s = signer();
        let token = s
            .issue("alice", "blob-1", "report.pdf", Duration::from_secs(300))
            .unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        // Swap the leading signature character for a different base64url
        // character (the trailing one carries padding bits the decoder may
        // reject outright).
        let flipped = if sig.starts_with('A') {
            format!("B{}", &sig[1..])
        } else {
            format!("A{}", &sig[1..])
        };
        let tampered = format!("{head}.{flipped}");

        assert!(matches!(
            s.verify(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = signer()
            .issue("alice", "blob-1", "report.pdf", Duration::from_secs(300))
            .unwrap();

        let other = TokenSigner::new("a-different-secret");
        assert!(matches!(
            other.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn malformed_strings_are_rejected_as_malformed() {
        let s = signer();
        for garbage in ["", "abc", "abc.def", "abc.def.ghi", "a.b.c.d"] {
            assert!(
                matches!(s.verify(garbage), Err(TokenError::Malformed)),
                "expected Malformed for {garbage:?}"
            );
        }
    }

    #[test]
    fn previous_secret_still_verifies_after_rotation() {
        let old = TokenSigner::new("old-secret");
        let token = old
            .issue("alice", "blob-1", "report.pdf", Duration::from_secs(300))
            .unwrap();

        let rotated = TokenSigner::with_previous("new-secret", "old-secret");
        let claim = rotated.verify(&token).unwrap();
        assert_eq!(claim.file_id, "blob-1");

        // Once the old secret is dropped entirely, the token is foreign.
        let dropped = TokenSigner::new("new-secret");
        assert!(matches!(
            dropped.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn expired_token_under_previous_secret_reports_expired() {
        let past = jsonwebtoken::get_current_timestamp() - 30;
        let token = issue_with_exp("old-secret", past);

        let rotated = TokenSigner::with_previous("new-secret", "old-secret");
        assert!(matches!(rotated.verify(&token), Err(TokenError::Expired)));
    }
}
