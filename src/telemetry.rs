//! `tracing` subscriber setup for the operator binary.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter `{directive}`: {reason}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds the event filter. `RUST_LOG` wins over the configured directive.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `RUST_LOG` is unset and
/// `directive` does not parse.
pub fn filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }
    EnvFilter::try_new(directive).map_err(|err| TelemetryError::InvalidFilter {
        directive: directive.to_owned(),
        reason: err.to_string(),
    })
}

/// Installs a formatting subscriber writing to standard error.
///
/// Standard output stays free for command results.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber
/// is already installed.
pub fn init(directive: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(directive)?)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInstalled(err.to_string()))
}
