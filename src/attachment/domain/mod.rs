//! Domain model for uploaded and stored evidence files.

mod error;
mod file;
mod naming;

pub use error::AttachmentDomainError;
pub use file::{StoredFile, UploadedFile};
pub use naming::{candidate_name, sanitize_filename, split_extension};
