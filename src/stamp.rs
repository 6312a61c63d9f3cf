//! Minute-granular timestamps stored as fixed-width strings.
//!
//! Records are stamped as `YYYY-MM-DDTHH:MM` in UTC. The format is
//! zero-padded so that lexical order of the stored strings equals
//! chronological order, which the date-range queries rely on.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Storage format for [`MinuteStamp`].
pub const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

const STAMP_WIDTH: usize = "YYYY-MM-DDTHH:MM".len();

/// Error returned when a stored stamp cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid minute stamp '{0}', expected YYYY-MM-DDTHH:MM")]
pub struct ParseStampError(pub String);

/// UTC timestamp truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MinuteStamp(NaiveDateTime);

impl MinuteStamp {
    /// Reads the current time from `clock`, truncated to the minute.
    #[must_use]
    pub fn now(clock: &impl Clock) -> Self {
        Self::from_utc(clock.utc())
    }

    /// Truncates a UTC instant to the minute.
    #[must_use]
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        let naive = instant.naive_utc();
        let truncated = naive
            .with_second(0)
            .and_then(|value| value.with_nanosecond(0))
            .unwrap_or(naive);
        Self(truncated)
    }

    /// Parses the storage representation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseStampError`] when `value` is not `YYYY-MM-DDTHH:MM`.
    pub fn parse(value: &str) -> Result<Self, ParseStampError> {
        let trimmed = value.trim();
        if trimmed.len() != STAMP_WIDTH {
            return Err(ParseStampError(value.to_owned()));
        }
        NaiveDateTime::parse_from_str(trimmed, STAMP_FORMAT)
            .map(Self)
            .map_err(|_| ParseStampError(value.to_owned()))
    }

    /// Returns the calendar day of the stamp.
    #[must_use]
    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the underlying naive UTC date-time.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDateTime {
        self.0
    }

    /// Returns the fixed-width storage string.
    #[must_use]
    pub fn to_storage(self) -> String {
        self.0.format(STAMP_FORMAT).to_string()
    }
}

impl fmt::Display for MinuteStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STAMP_FORMAT))
    }
}

impl From<MinuteStamp> for String {
    fn from(value: MinuteStamp) -> Self {
        value.to_storage()
    }
}

impl TryFrom<String> for MinuteStamp {
    type Error = ParseStampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
