//! Embedded schema migrations.
//!
//! Migration directories under `migrations/` are compiled into the binary
//! and applied in version order. Diesel records each applied version in
//! `__diesel_schema_migrations`, so running this again is a no-op.

use super::{SqlitePool, StorageError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Ordered migration set for the maintenance store.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies every pending migration and returns the versions that ran.
///
/// # Errors
///
/// Returns [`StorageError::Migration`] when a migration fails and
/// [`StorageError::Pool`] when no connection is available.
pub async fn run_pending_migrations(pool: &SqlitePool) -> Result<Vec<String>, StorageError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get()?;
        let applied = connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| StorageError::Migration(err.to_string()))?;
        let versions: Vec<String> = applied.iter().map(ToString::to_string).collect();
        for version in &versions {
            tracing::info!(%version, "applied migration");
        }
        Ok(versions)
    })
    .await?
}
