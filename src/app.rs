//! Composition root wiring the SQLite adapters into the services.

use crate::attachment::{adapters::directory::CapStdBlobStore, services::AttachmentStore};
use crate::catalog::{
    adapters::sqlite::SqliteCatalogRepository,
    services::{CatalogService, CatalogServiceError, SeedReport},
};
use crate::config::MaintlogConfig;
use crate::intake::{adapters::sqlite::SqliteIntakeRepository, services::IntakeService};
use crate::ledger::{
    adapters::sqlite::SqliteWorkOrderRepository,
    services::{LedgerService, ResolutionWorkflow},
};
use crate::provisioning::ProvisioningService;
use crate::storage::{SqlitePool, StorageError, connect, run_pending_migrations};
use camino::Utf8PathBuf;
use mockable::DefaultClock;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Ledger service over the production adapters.
pub type AppLedger =
    LedgerService<SqliteWorkOrderRepository, SqliteCatalogRepository, CapStdBlobStore, DefaultClock>;

/// Resolution workflow over the production adapters.
pub type AppResolution = ResolutionWorkflow<SqliteWorkOrderRepository, CapStdBlobStore, DefaultClock>;

/// Intake service over the production adapters.
pub type AppIntake =
    IntakeService<SqliteIntakeRepository, SqliteCatalogRepository, CapStdBlobStore, DefaultClock>;

/// Failures while opening the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The database could not be opened or migrated.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The upload directory could not be opened.
    #[error("cannot open upload directory {path}: {source}")]
    UploadDir {
        /// Configured directory.
        path: Utf8PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
    /// Startup seeding failed.
    #[error("seeding failed: {0}")]
    Seed(#[from] CatalogServiceError),
}

/// Every service of the maintenance store, sharing one pool and one
/// upload directory.
pub struct Maintlog {
    /// Sections, technicians, and components.
    pub catalog: CatalogService<SqliteCatalogRepository>,
    /// Record creation and reporting.
    pub ledger: AppLedger,
    /// Fault resolution.
    pub resolution: AppResolution,
    /// Spare-part requests and help reports.
    pub intake: AppIntake,
    /// Section listing for the provisioning tool.
    pub provisioning: ProvisioningService<SqliteCatalogRepository>,
}

impl Maintlog {
    /// Opens the database, applies pending migrations, opens the upload
    /// directory, and seeds the catalog when configured to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when any of those steps fails.
    pub async fn open(config: &MaintlogConfig) -> Result<Self, AppError> {
        let pool = open_pool(config).await?;
        let blobs = CapStdBlobStore::open(&config.upload_dir).map_err(|source| {
            AppError::UploadDir {
                path: config.upload_dir.clone(),
                source,
            }
        })?;
        let app = Self::assemble(&pool, blobs, &config.scan_url_template);
        if config.seed_on_startup {
            app.seed(config).await?;
        }
        Ok(app)
    }

    /// Wires services over an already migrated pool.
    #[must_use]
    pub fn assemble(pool: &SqlitePool, blobs: CapStdBlobStore, scan_url_template: &str) -> Self {
        let catalog_repo = Arc::new(SqliteCatalogRepository::new(pool.clone()));
        let work_orders = Arc::new(SqliteWorkOrderRepository::new(pool.clone()));
        let intake_repo = Arc::new(SqliteIntakeRepository::new(pool.clone()));
        let attachments = AttachmentStore::new(Arc::new(blobs));
        let clock = Arc::new(DefaultClock);

        Self {
            catalog: CatalogService::new(Arc::clone(&catalog_repo)),
            ledger: LedgerService::new(
                Arc::clone(&work_orders),
                Arc::clone(&catalog_repo),
                attachments.clone(),
                Arc::clone(&clock),
            ),
            resolution: ResolutionWorkflow::new(work_orders, attachments.clone(), Arc::clone(&clock)),
            intake: IntakeService::new(intake_repo, Arc::clone(&catalog_repo), attachments, clock),
            provisioning: ProvisioningService::new(catalog_repo).with_template(scan_url_template),
        }
    }

    /// Seeds the default line sections and configured technicians.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Seed`] when seeding fails.
    pub async fn seed(&self, config: &MaintlogConfig) -> Result<SeedReport, AppError> {
        Ok(self.catalog.seed(&config.seed_plan()).await?)
    }
}

/// Opens the pool and applies pending migrations.
///
/// # Errors
///
/// Returns [`StorageError`] when the database cannot be opened or migrated.
pub async fn open_pool(config: &MaintlogConfig) -> Result<SqlitePool, StorageError> {
    let settings = config.pool_settings();
    let pool = tokio::task::spawn_blocking(move || connect(&settings)).await??;
    let applied = run_pending_migrations(&pool).await?;
    info!(
        database_url = %config.database_url,
        migrations = applied.len(),
        "store ready"
    );
    Ok(pool)
}
