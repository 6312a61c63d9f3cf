//! Validated display name shared by catalog entries.

use super::CatalogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed display name for a section, technician, or component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogName(String);

impl CatalogName {
    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyName`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogDomainError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CatalogName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CatalogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
