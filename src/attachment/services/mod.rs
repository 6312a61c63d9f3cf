//! Application services for staging and reading evidence files.

mod store;

pub use store::{AttachmentError, AttachmentResult, AttachmentStore, MAX_NAME_ATTEMPTS};
