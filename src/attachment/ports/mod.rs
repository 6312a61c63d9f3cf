//! Port contracts for the blob namespace.

mod blob_store;

pub use blob_store::{BlobStore, BlobStoreError, BlobStoreResult};
