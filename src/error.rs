//! Failure taxonomy shared by every service in the crate.
//!
//! Each bounded context keeps its own `thiserror` enums; this module only
//! classifies them so a presentation layer can map failures uniformly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An unknown section code, record id, or catalog id was referenced.
    NotFound,
    /// A resolution was attempted on a record that is already resolved.
    AlreadyResolved,
    /// Input was rejected before any write took place.
    ValidationFailure,
    /// The attachment namespace could not supply a free file name.
    StorageConflict,
    /// The database or filesystem failed underneath the operation.
    Infrastructure,
}

impl ErrorKind {
    /// Returns the canonical snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyResolved => "already_resolved",
            Self::ValidationFailure => "validation_failure",
            Self::StorageConflict => "storage_conflict",
            Self::Infrastructure => "infrastructure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
