//! Collision-free staging of uploaded files into a blob namespace.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::attachment::{
    domain::{AttachmentDomainError, StoredFile, UploadedFile, candidate_name, sanitize_filename},
    ports::{BlobStore, BlobStoreError},
};
use crate::error::ErrorKind;

/// Default bound on names tried per upload before giving up.
pub const MAX_NAME_ATTEMPTS: u32 = 1_000;

/// Errors returned while staging or reading attachments.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// An upload was rejected before anything was written.
    #[error(transparent)]
    Domain(#[from] AttachmentDomainError),
    /// Every candidate name for an upload was already taken.
    #[error("no free name for {filename} after {attempts} attempts")]
    NamesExhausted {
        /// Sanitized client filename.
        filename: String,
        /// Number of names tried.
        attempts: u32,
    },
    /// The blob store failed.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
    /// The blocking task running the writes did not complete.
    #[error("attachment task failed: {0}")]
    Join(#[from] JoinError),
}

impl AttachmentError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailure,
            Self::NamesExhausted { .. } => ErrorKind::StorageConflict,
            Self::Blob(BlobStoreError::NotFound(_)) => ErrorKind::NotFound,
            Self::Blob(_) | Self::Join(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for attachment operations.
pub type AttachmentResult<T> = Result<T, AttachmentError>;

struct PreparedUpload {
    filename: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

/// Stages uploads into a [`BlobStore`] under unique names.
#[derive(Debug)]
pub struct AttachmentStore<B>
where
    B: BlobStore + 'static,
{
    blobs: Arc<B>,
    max_attempts: u32,
}

impl<B> Clone for AttachmentStore<B>
where
    B: BlobStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            blobs: Arc::clone(&self.blobs),
            max_attempts: self.max_attempts,
        }
    }
}

impl<B> AttachmentStore<B>
where
    B: BlobStore + 'static,
{
    /// Creates a store trying at most [`MAX_NAME_ATTEMPTS`] names per upload.
    #[must_use]
    pub const fn new(blobs: Arc<B>) -> Self {
        Self {
            blobs,
            max_attempts: MAX_NAME_ATTEMPTS,
        }
    }

    /// Overrides the per-upload name bound. A bound of zero is raised to one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Writes every upload under a name nobody else holds.
    ///
    /// All filenames are validated before the first write. Uploads are then
    /// stored in order; each one independently falls back to `stem_N.ext`
    /// when its name is taken. Payloads are durable when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Domain`] when a filename is unusable,
    /// [`AttachmentError::NamesExhausted`] when the name bound is reached,
    /// or [`AttachmentError::Blob`] when the store fails. Files stored before
    /// a failure are left in place.
    pub async fn stage(&self, uploads: Vec<UploadedFile>) -> AttachmentResult<Vec<StoredFile>> {
        if uploads.is_empty() {
            return Ok(Vec::new());
        }
        let prepared = uploads
            .into_iter()
            .map(prepare)
            .collect::<Result<Vec<_>, _>>()?;

        let blobs = Arc::clone(&self.blobs);
        let max_attempts = self.max_attempts;
        tokio::task::spawn_blocking(move || {
            let mut stored = Vec::with_capacity(prepared.len());
            for upload in prepared {
                match store_one(blobs.as_ref(), upload, max_attempts) {
                    Ok(file) => stored.push(file),
                    Err(err) => {
                        if !stored.is_empty() {
                            warn!(
                                orphaned = stored.len(),
                                error = %err,
                                "staging aborted after earlier files were written"
                            );
                        }
                        return Err(err);
                    }
                }
            }
            Ok(stored)
        })
        .await?
    }

    /// Reads a stored payload by its stored name.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Domain`] for names that are not plain file
    /// names and [`AttachmentError::Blob`] when the payload is missing or the
    /// store fails.
    pub async fn open(&self, filename: &str) -> AttachmentResult<Vec<u8>> {
        let name = sanitize_filename(filename)?;
        if name != filename {
            return Err(AttachmentDomainError::InvalidFilename(filename.to_owned()).into());
        }
        let blobs = Arc::clone(&self.blobs);
        let payload = tokio::task::spawn_blocking(move || blobs.read(&name)).await??;
        debug!(filename, bytes = payload.len(), "read attachment");
        Ok(payload)
    }
}

fn prepare(upload: UploadedFile) -> AttachmentResult<PreparedUpload> {
    let (raw_name, mime_type, bytes) = upload.into_parts();
    let filename = sanitize_filename(&raw_name)?;
    Ok(PreparedUpload {
        filename,
        mime_type,
        bytes,
    })
}

fn store_one<B>(blobs: &B, upload: PreparedUpload, max_attempts: u32) -> AttachmentResult<StoredFile>
where
    B: BlobStore + ?Sized,
{
    let digest = format!("{:x}", Sha256::digest(&upload.bytes));
    for attempt in 0..max_attempts {
        let candidate = candidate_name(&upload.filename, attempt);
        match blobs.create_new(&candidate, &upload.bytes) {
            Ok(storage_path) => {
                info!(
                    requested = %upload.filename,
                    stored = %candidate,
                    bytes = upload.bytes.len(),
                    "stored attachment"
                );
                return Ok(StoredFile {
                    filename: candidate,
                    mime_type: upload.mime_type,
                    storage_path,
                    content_digest: digest,
                });
            }
            Err(BlobStoreError::AlreadyExists) => {
                debug!(candidate = %candidate, "attachment name taken");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(AttachmentError::NamesExhausted {
        filename: upload.filename,
        attempts: max_attempts,
    })
}
