//! Layered runtime configuration.
//!
//! Values are merged in this order, later layers winning:
//!
//! 1. compiled defaults
//! 2. `maintlog.toml` in the working directory (or an explicit path)
//! 3. `MAINTLOG_*` environment variables, e.g. `MAINTLOG_DATABASE_URL`

use crate::catalog::services::{SeedPlan, SeedTechnician};
use crate::provisioning::DEFAULT_SCAN_URL_TEMPLATE;
use crate::storage::PoolSettings;
use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "maintlog.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "MAINTLOG_";

/// Failure to assemble the configuration.
#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] Box<figment::Error>);

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Runtime settings for the maintenance store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaintlogConfig {
    /// SQLite database path.
    pub database_url: String,
    /// Directory receiving attachment payloads.
    pub upload_dir: Utf8PathBuf,
    /// Maximum pooled database connections.
    pub pool_size: u32,
    /// How long a writer waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
    /// Base URL embedded in scan targets.
    pub base_url: String,
    /// `minijinja` template rendering a section's scan URL.
    pub scan_url_template: String,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Seed the default line sections whenever the store is opened.
    pub seed_on_startup: bool,
    /// Technicians added by seeding when absent.
    #[serde(default)]
    pub seed_technicians: Vec<SeedTechnician>,
}

impl Default for MaintlogConfig {
    fn default() -> Self {
        Self {
            database_url: "maintlog.sqlite3".to_owned(),
            upload_dir: Utf8PathBuf::from("uploads"),
            pool_size: 4,
            busy_timeout_ms: 5_000,
            base_url: "http://localhost:8000".to_owned(),
            scan_url_template: DEFAULT_SCAN_URL_TEMPLATE.to_owned(),
            log_filter: "info".to_owned(),
            seed_on_startup: false,
            seed_technicians: Vec::new(),
        }
    }
}

impl MaintlogConfig {
    /// Loads `maintlog.toml` and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a layer is malformed or names an
    /// unknown key.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(None))
    }

    /// Loads an explicit configuration file and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a layer is malformed or names an
    /// unknown key.
    pub fn load_from(path: &Utf8Path) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(Some(path)))
    }

    /// Builds the layered provider without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Utf8Path>) -> Figment {
        let file = path.map_or_else(
            || Utf8PathBuf::from(DEFAULT_CONFIG_FILE),
            Utf8Path::to_path_buf,
        );
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(file.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extracts settings from a prepared provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Returns the pool settings derived from this configuration.
    #[must_use]
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings::new(self.database_url.as_str())
            .with_max_size(self.pool_size)
            .with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))
    }

    /// Returns the default line plus the configured technicians.
    #[must_use]
    pub fn seed_plan(&self) -> SeedPlan {
        let mut plan = SeedPlan::default_line();
        plan.technicians.extend(self.seed_technicians.iter().cloned());
        plan
    }
}
