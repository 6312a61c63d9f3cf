//! Shared test helpers for SQLite integration tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use eyre::WrapErr;
use maintlog::attachment::{adapters::directory::CapStdBlobStore, services::AttachmentStore};
use maintlog::catalog::{adapters::sqlite::SqliteCatalogRepository, services::CatalogService};
use maintlog::intake::{adapters::sqlite::SqliteIntakeRepository, services::IntakeService};
use maintlog::ledger::{
    adapters::sqlite::SqliteWorkOrderRepository,
    services::{LedgerService, ResolutionWorkflow},
};
use maintlog::storage::{PoolSettings, SqlitePool, connect, run_pending_migrations};
use mockable::Clock;
use tempfile::TempDir;

/// Clock reporting a settable UTC minute.
#[derive(Debug)]
pub struct StepClock {
    now: Mutex<DateTime<Utc>>,
}

impl StepClock {
    /// Creates a clock reading `raw` (`YYYY-MM-DDTHH:MM`).
    pub fn at(raw: &str) -> Self {
        Self {
            now: Mutex::new(parse(raw)),
        }
    }

    /// Moves the clock to `raw`.
    pub fn set(&self, raw: &str) {
        *self.now.lock().expect("clock lock") = parse(raw);
    }
}

impl Clock for StepClock {
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

/// Ledger service over SQLite and a temporary upload directory.
pub type TestLedger =
    LedgerService<SqliteWorkOrderRepository, SqliteCatalogRepository, CapStdBlobStore, StepClock>;

/// Resolution workflow over SQLite.
pub type TestWorkflow = ResolutionWorkflow<SqliteWorkOrderRepository, CapStdBlobStore, StepClock>;

/// Intake service over SQLite.
pub type TestIntake =
    IntakeService<SqliteIntakeRepository, SqliteCatalogRepository, CapStdBlobStore, StepClock>;

/// Services sharing one temporary database and upload directory.
pub struct SqliteHarness {
    /// Keeps the temporary files alive.
    pub dir: TempDir,
    /// Catalog repository, for direct adapter checks.
    pub catalog_repo: Arc<SqliteCatalogRepository>,
    /// Work order repository, for direct adapter checks.
    pub work_orders: Arc<SqliteWorkOrderRepository>,
    /// Catalog service.
    pub catalog: CatalogService<SqliteCatalogRepository>,
    /// Ledger service.
    pub ledger: TestLedger,
    /// Resolution workflow.
    pub workflow: TestWorkflow,
    /// Intake service.
    pub intake: TestIntake,
    /// Shared clock.
    pub clock: Arc<StepClock>,
}

/// Opens a migrated pool on a fresh file inside `dir`.
pub async fn migrated_pool(dir: &TempDir) -> eyre::Result<SqlitePool> {
    let path = dir.path().join("maintlog.sqlite3");
    let url = path
        .to_str()
        .ok_or_else(|| eyre::eyre!("temporary path is not UTF-8"))?
        .to_owned();
    let settings = PoolSettings::new(url);
    let pool = tokio::task::spawn_blocking(move || connect(&settings))
        .await?
        .wrap_err("open pool")?;
    run_pending_migrations(&pool)
        .await
        .wrap_err("run migrations")?;
    Ok(pool)
}

/// Builds every service over a fresh database, clock at 2024-01-15T08:30.
pub async fn sqlite_harness() -> eyre::Result<SqliteHarness> {
    let dir = tempfile::tempdir()?;
    let pool = migrated_pool(&dir).await?;
    let uploads = camino::Utf8PathBuf::from_path_buf(dir.path().join("uploads"))
        .map_err(|path| eyre::eyre!("non UTF-8 upload path {}", path.display()))?;
    let attachments = AttachmentStore::new(Arc::new(CapStdBlobStore::open(&uploads)?));
    let catalog_repo = Arc::new(SqliteCatalogRepository::new(pool.clone()));
    let work_orders = Arc::new(SqliteWorkOrderRepository::new(pool.clone()));
    let intake_repo = Arc::new(SqliteIntakeRepository::new(pool.clone()));
    let clock = Arc::new(StepClock::at("2024-01-15T08:30"));

    Ok(SqliteHarness {
        catalog: CatalogService::new(Arc::clone(&catalog_repo)),
        ledger: LedgerService::new(
            Arc::clone(&work_orders),
            Arc::clone(&catalog_repo),
            attachments.clone(),
            Arc::clone(&clock),
        ),
        workflow: ResolutionWorkflow::new(
            Arc::clone(&work_orders),
            attachments.clone(),
            Arc::clone(&clock),
        ),
        intake: IntakeService::new(
            intake_repo,
            Arc::clone(&catalog_repo),
            attachments,
            Arc::clone(&clock),
        ),
        dir,
        catalog_repo,
        work_orders,
        clock,
    })
}
