//! Error types for attachment domain validation.

use thiserror::Error;

/// Validation failures for uploaded files.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentDomainError {
    /// The client-supplied name has no usable final path component.
    #[error("invalid attachment filename: {0:?}")]
    InvalidFilename(String),
}
