//! Error types for intake validation.

use thiserror::Error;

/// Validation failures for intake requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeDomainError {
    /// A mandatory text field was empty after trimming.
    #[error("{0} must not be empty")]
    EmptyText(&'static str),
}

/// Error returned when parsing an unknown intake kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown intake kind: {0}")]
pub struct ParseIntakeKindError(pub String);
