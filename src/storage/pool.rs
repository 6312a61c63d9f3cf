//! Connection pool construction for the SQLite store.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use std::time::Duration;
use thiserror::Error;

/// SQLite connection pool type used by every adapter.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Errors raised while opening or migrating the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// A schema migration failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// A blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Tunables for [`connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Diesel database URL (a file path or `:memory:`).
    pub database_url: String,
    /// Maximum pooled connections.
    pub max_size: u32,
    /// How long a writer waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl PoolSettings {
    /// Creates settings with the default pool size and busy timeout.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}

/// Applies connection-scoped PRAGMAs every time a connection is opened.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let pragmas = format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        );
        connection
            .batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool for the configured database.
///
/// Every connection enforces foreign keys and waits up to the busy timeout
/// on a locked database, so concurrent writers serialize instead of failing.
/// A `:memory:` database is private to each connection; use `max_size = 1`
/// for it.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when the first connection cannot be
/// opened.
pub fn connect(settings: &PoolSettings) -> Result<SqlitePool, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(settings.database_url.as_str());
    let pool = Pool::builder()
        .max_size(settings.max_size)
        .connection_customizer(Box::new(ConnectionPragmas {
            busy_timeout: settings.busy_timeout,
        }))
        .build(manager)?;
    tracing::debug!(
        database_url = %settings.database_url,
        max_size = settings.max_size,
        "sqlite pool ready"
    );
    Ok(pool)
}
