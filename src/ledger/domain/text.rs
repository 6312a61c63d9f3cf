//! Validated free-text fields of a maintenance record.

use super::LedgerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The one record type that starts out unresolved.
pub const FAULT_REPORT: &str = "fault report";

/// Non-empty, trimmed narrative text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Narrative(String);

impl Narrative {
    /// Validates `value` as the named field.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::EmptyText`] naming `field` when the value
    /// is blank.
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, LedgerDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerDomainError::EmptyText(field));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of maintenance entry, e.g. `"preventive"` or [`FAULT_REPORT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkType(String);

impl WorkType {
    /// Validates a record type.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::EmptyText`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, LedgerDomainError> {
        Narrative::new("work type", value).map(|text| Self(text.0))
    }

    /// Returns the fault-report type.
    #[must_use]
    pub fn fault_report() -> Self {
        Self(FAULT_REPORT.to_owned())
    }

    /// Returns `true` for the literal fault-report type only.
    #[must_use]
    pub fn is_fault_report(&self) -> bool {
        self.0 == FAULT_REPORT
    }

    /// Returns the type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
