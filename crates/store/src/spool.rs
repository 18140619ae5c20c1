use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::BlobStore;

/// Filesystem-backed [`BlobStore`] spooling blobs under a single directory.
///
/// Ids are UUIDv4 strings and double as the on-disk file name, so two
/// concurrent uploads can never collide. The id map is process-lifetime only,
/// which matches the service's statelessness: links do not survive a restart
/// anyway because their signing secret may not.
pub struct SpoolStore {
    root: PathBuf,
    entries: DashMap<String, PathBuf>,
}

impl SpoolStore {
    /// Open a spool rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            entries: DashMap::new(),
        })
    }

    /// The directory blobs are spooled under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobStore for SpoolStore {
    async fn put(&self, data: &[u8]) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let path = self.root.join(&id);
        tokio::fs::write(&path, data).await?;
        self.entries.insert(id.clone(), path);
        Ok(id)
    }

    fn resolve(&self, id: &str) -> Option<PathBuf> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_resolve_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SpoolStore::open(dir.path()).unwrap();

        let id = store.put(b"hello beamdrop").await.unwrap();
        let path = store.resolve(&id).expect("id should resolve");

        assert_eq!(std::fs::read(path).unwrap(), b"hello beamdrop");
    }

    #[tokio::test]
    async fn unknown_id_does_not_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let store = SpoolStore::open(dir.path()).unwrap();

        assert!(store.resolve("no-such-id").is_none());
    }

    #[tokio::test]
    async fn concurrent_puts_get_distinct_ids_and_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = SpoolStore::open(dir.path()).unwrap();

        let a = store.put(b"alice's bytes").await.unwrap();
        let b = store.put(b"bob's bytes").await.unwrap();
        assert_ne!(a, b);

        assert_eq!(std::fs::read(store.resolve(&a).unwrap()).unwrap(), b"alice's bytes");
        assert_eq!(std::fs::read(store.resolve(&b).unwrap()).unwrap(), b"bob's bytes");
    }

    #[tokio::test]
    async fn resolve_survives_blob_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let store = SpoolStore::open(dir.path()).unwrap();

        let id = store.put(b"ephemeral").await.unwrap();
        let path = store.resolve(&id).unwrap();
        std::fs::remove_file(&path).unwrap();

        // The mapping is still known; the missing file is the reader's
        // problem to report.
        assert_eq!(store.resolve(&id), Some(path));
    }
}
