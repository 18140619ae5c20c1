use thiserror::Error;

/// Failures from the blob store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Spool directory or blob I/O failed.
    #[error("spool io error: {0}")]
    Io(#[from] std::io::Error),
}
