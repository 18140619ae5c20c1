//! Blob storage for beamdrop uploads.
//!
//! Each uploaded file lands under a spool directory at a generated name and
//! is referred to everywhere else by an opaque id. The id-to-path mapping
//! lives only inside the store, so nothing that leaves the process (tokens
//! included) reveals the on-disk layout.

pub mod error;
pub mod spool;
pub mod store;

pub use error::StoreError;
pub use spool::SpoolStore;
pub use store::BlobStore;
