//! Error types for ledger domain validation and transitions.

use super::WorkOrderId;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while building or transitioning maintenance records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerDomainError {
    /// A mandatory text field was empty after trimming.
    #[error("{0} must not be empty")]
    EmptyText(&'static str),

    /// Downtime does not fit the storage column.
    #[error("downtime of {0} minutes is out of range")]
    DowntimeOutOfRange(u32),

    /// The record already left the pending state.
    #[error("work order {0} is already resolved")]
    AlreadyResolved(WorkOrderId),

    /// A date could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The window starts after it ends.
    #[error("date window starts at {from} after it ends at {to}")]
    InvertedDateWindow {
        /// First day of the window.
        from: NaiveDate,
        /// Last day of the window.
        to: NaiveDate,
    },
}
