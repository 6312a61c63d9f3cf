//! Blob namespace abstraction backing attachment storage.

use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// A flat namespace of named payloads.
///
/// Operations are blocking; async callers run them on the blocking pool.
pub trait BlobStore: Send + Sync {
    /// Atomically claims `name` and writes `payload` into it.
    ///
    /// Returns the location of the stored payload. The payload is flushed to
    /// durable storage before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::AlreadyExists`] when the name is taken. No
    /// existing payload is touched in that case.
    fn create_new(&self, name: &str, payload: &[u8]) -> BlobStoreResult<String>;

    /// Reads a stored payload back.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::NotFound`] when no payload has the name.
    fn read(&self, name: &str) -> BlobStoreResult<Vec<u8>>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// The name is already claimed.
    #[error("blob already exists")]
    AlreadyExists,
    /// No payload is stored under the name.
    #[error("blob not found: {0}")]
    NotFound(String),
    /// The underlying storage failed.
    #[error("blob store i/o failed: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for BlobStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
