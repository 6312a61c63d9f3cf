//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that reports a settable instant.
#[derive(Debug)]
pub(crate) struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock reading `raw` (`YYYY-MM-DDTHH:MM`, UTC).
    pub(crate) fn at(raw: &str) -> Self {
        Self {
            now: Mutex::new(parse(raw)),
        }
    }

    /// Moves the clock to `raw`.
    pub(crate) fn set(&self, raw: &str) {
        *self.now.lock().expect("clock lock") = parse(raw);
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

fn parse(raw: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .expect("fixture stamp")
        .and_utc()
}
