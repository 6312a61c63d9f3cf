//! Upload payloads and the files they become once stored.

use serde::{Deserialize, Serialize};

/// A file as handed over by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    filename: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Creates an upload with no declared media type.
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    /// Sets the media type declared by the client.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        let declared = mime_type.into();
        let trimmed = declared.trim();
        self.mime_type = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the client-supplied filename, unsanitized.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the declared media type.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the payload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, Vec<u8>) {
        (self.filename, self.mime_type, self.bytes)
    }
}

/// A payload that has been durably written to the blob namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Name actually claimed in the namespace.
    pub filename: String,
    /// Media type declared at upload.
    pub mime_type: Option<String>,
    /// Location reported by the blob store.
    pub storage_path: String,
    /// Lower-case hex SHA-256 of the payload.
    pub content_digest: String,
}
