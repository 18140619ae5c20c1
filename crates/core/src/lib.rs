//! Claim and signed-token primitives for beamdrop.
//!
//! A token is a compact three-segment HS256 credential carrying a [`Claim`]:
//! who requested the link, which stored blob it refers to, the name the file
//! should be delivered under, and when the link stops working. Tokens are
//! stateless bearer credentials: nothing is stored server-side, and a token
//! is verified entirely from its own bytes plus the signing secret.

pub mod claim;
pub mod error;
pub mod signer;

pub use claim::Claim;
pub use error::TokenError;
pub use signer::TokenSigner;
