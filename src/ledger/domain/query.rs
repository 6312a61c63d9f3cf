//! Query parameters for ledger listings.

use super::LedgerDomainError;
use crate::stamp::MinuteStamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateWindow {
    /// Creates a window covering `from` through `to`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvertedDateWindow`] when `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, LedgerDomainError> {
        if from > to {
            return Err(LedgerDomainError::InvertedDateWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// Parses two `YYYY-MM-DD` strings into a window.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidDate`] for unparsable input and
    /// [`LedgerDomainError::InvertedDateWindow`] when `from > to`.
    pub fn parse(from: &str, to: &str) -> Result<Self, LedgerDomainError> {
        Self::new(parse_day(from)?, parse_day(to)?)
    }

    /// Returns the first day.
    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    /// Returns the last day.
    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    /// Smallest stored stamp string inside the window.
    #[must_use]
    pub fn lower_bound(&self) -> String {
        self.from.format(DAY_FORMAT).to_string()
    }

    /// Largest stored stamp string inside the window.
    #[must_use]
    pub fn upper_bound(&self) -> String {
        format!("{}T23:59", self.to.format(DAY_FORMAT))
    }

    /// Returns `true` when `stamp` falls on a day of the window.
    #[must_use]
    pub fn contains(&self, stamp: MinuteStamp) -> bool {
        (self.from..=self.to).contains(&stamp.date())
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, LedgerDomainError> {
    NaiveDate::parse_from_str(raw.trim(), DAY_FORMAT)
        .map_err(|_| LedgerDomainError::InvalidDate(raw.to_owned()))
}

/// Selects one side of the fault-report triage queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultFilter {
    /// Fault reports awaiting resolution.
    Pending,
    /// Fault reports that have been resolved.
    Resolved,
}

impl FaultFilter {
    /// Returns the persisted `resolved` flag this filter selects.
    #[must_use]
    pub const fn resolved_flag(self) -> bool {
        matches!(self, Self::Resolved)
    }
}
