use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::StoreError;

/// Storage seam for uploaded blobs.
///
/// The store owns blob lifecycle and path assignment; callers only ever see
/// the opaque ids it hands out. The download path reads blobs and never
/// deletes or moves them.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `data` and return the opaque id it can be resolved by.
    async fn put(&self, data: &[u8]) -> Result<String, StoreError>;

    /// Resolve an id back to the path its blob was written to, if the id is
    /// known to this store. Resolution does not check that the file still
    /// exists; that is the reader's concern.
    fn resolve(&self, id: &str) -> Option<PathBuf>;
}
