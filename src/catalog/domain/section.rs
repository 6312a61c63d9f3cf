//! Line section aggregate and its external code.

use super::{CatalogDomainError, CatalogName, SectionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a section code, matching the storage column.
const MAX_CODE_LENGTH: usize = 64;

/// Stable external identifier of a section, embedded in scan targets.
///
/// Codes are trimmed and upper-cased; only ASCII letters, digits, `-` and
/// `_` are accepted so the code can be used verbatim as a URL segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionCode(String);

impl SectionCode {
    /// Creates a validated section code.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptySectionCode`] when the value is empty
    /// after trimming, [`CatalogDomainError::SectionCodeTooLong`] when it
    /// exceeds 64 characters, or [`CatalogDomainError::InvalidSectionCode`]
    /// when it contains characters outside `[A-Z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();

        if normalized.is_empty() {
            return Err(CatalogDomainError::EmptySectionCode);
        }

        if normalized.len() > MAX_CODE_LENGTH {
            return Err(CatalogDomainError::SectionCodeTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !is_valid {
            return Err(CatalogDomainError::InvalidSectionCode(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Physical module of the line against which records are filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    code: SectionCode,
    name: CatalogName,
    description: String,
}

/// Parameter object for reconstructing a persisted section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSectionData {
    /// Persisted section identifier.
    pub id: SectionId,
    /// Persisted external code.
    pub code: SectionCode,
    /// Persisted display name.
    pub name: CatalogName,
    /// Persisted free-form description.
    pub description: String,
}

impl Section {
    /// Creates a new section with a fresh identifier.
    #[must_use]
    pub fn new(code: SectionCode, name: CatalogName, description: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(),
            code,
            name,
            description: description.into().trim().to_owned(),
        }
    }

    /// Reconstructs a section from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSectionData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            name: data.name,
            description: data.description,
        }
    }

    /// Returns the section identifier.
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    /// Returns the external code.
    #[must_use]
    pub const fn code(&self) -> &SectionCode {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CatalogName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Overwrites the mutable fields. The code never changes.
    pub fn edit(&mut self, name: CatalogName, description: impl Into<String>) {
        self.name = name;
        self.description = description.into().trim().to_owned();
    }
}
