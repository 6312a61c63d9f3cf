//! In-memory blob store for tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::attachment::ports::{BlobStore, BlobStoreError, BlobStoreResult};

/// Thread-safe in-memory blob namespace.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored payloads.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] when the lock is poisoned.
    pub fn len(&self) -> BlobStoreResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns `true` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] when the lock is poisoned.
    pub fn is_empty(&self) -> BlobStoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> BlobStoreResult<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|err| std::io::Error::other(err.to_string()).into())
    }
}

impl BlobStore for InMemoryBlobStore {
    fn create_new(&self, name: &str, payload: &[u8]) -> BlobStoreResult<String> {
        match self.lock()?.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(BlobStoreError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(payload.to_vec());
                Ok(format!("memory://{name}"))
            }
        }
    }

    fn read(&self, name: &str) -> BlobStoreResult<Vec<u8>> {
        self.lock()?
            .get(name)
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound(name.to_owned()))
    }
}
