//! SQLite persistence plumbing shared by every adapter.
//!
//! - [`pool`]: r2d2 connection pool with per-connection PRAGMAs
//! - [`migrations`]: ordered, versioned schema migrations embedded at build
//!   time and applied once at startup

pub mod migrations;
pub mod pool;
pub(crate) mod schema;

pub use migrations::run_pending_migrations;
pub use pool::{PoolSettings, SqlitePool, StorageError, connect};
