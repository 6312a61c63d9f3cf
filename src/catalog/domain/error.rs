//! Error types for catalog domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing catalog domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogDomainError {
    /// The section code is empty after trimming.
    #[error("section code must not be empty")]
    EmptySectionCode,

    /// The section code contains characters outside `[A-Z0-9_-]`.
    #[error(
        "section code '{0}' contains invalid characters (only letters, digits, '-' and '_' allowed)"
    )]
    InvalidSectionCode(String),

    /// The section code exceeds the storage limit.
    #[error("section code exceeds 64 character limit: {0}")]
    SectionCodeTooLong(String),

    /// A section, technician, or component name is empty after trimming.
    #[error("catalog name must not be empty")]
    EmptyName,
}

/// Error returned while parsing a catalog status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown catalog status: {0}")]
pub struct ParseCatalogStatusError(pub String);
