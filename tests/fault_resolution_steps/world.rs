//! Shared world state for fault resolution BDD scenarios.

use std::sync::Arc;

use maintlog::attachment::{adapters::memory::InMemoryBlobStore, services::AttachmentStore};
use maintlog::catalog::{adapters::memory::InMemoryCatalogRepository, services::CatalogService};
use maintlog::ledger::{
    adapters::memory::InMemoryWorkOrderRepository,
    domain::WorkOrder,
    services::{LedgerService, ResolutionError, ResolutionWorkflow},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Ledger service type used by the BDD world.
pub type TestLedger = LedgerService<
    InMemoryWorkOrderRepository,
    InMemoryCatalogRepository,
    InMemoryBlobStore,
    DefaultClock,
>;

/// Resolution workflow type used by the BDD world.
pub type TestWorkflow =
    ResolutionWorkflow<InMemoryWorkOrderRepository, InMemoryBlobStore, DefaultClock>;

/// Scenario world for fault resolution behaviour tests.
pub struct FaultResolutionWorld {
    pub catalog: CatalogService<InMemoryCatalogRepository>,
    pub ledger: TestLedger,
    pub workflow: TestWorkflow,
    pub record: Option<WorkOrder>,
    pub last_resolution: Option<Result<WorkOrder, ResolutionError>>,
}

impl FaultResolutionWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let catalog_repo = Arc::new(InMemoryCatalogRepository::new());
        let work_orders = Arc::new(InMemoryWorkOrderRepository::new());
        let attachments = AttachmentStore::new(Arc::new(InMemoryBlobStore::new()));
        let clock = Arc::new(DefaultClock);

        Self {
            catalog: CatalogService::new(Arc::clone(&catalog_repo)),
            ledger: LedgerService::new(
                Arc::clone(&work_orders),
                catalog_repo,
                attachments.clone(),
                Arc::clone(&clock),
            ),
            workflow: ResolutionWorkflow::new(work_orders, attachments, clock),
            record: None,
            last_resolution: None,
        }
    }

    /// Returns the record created by the scenario.
    pub fn record(&self) -> Result<&WorkOrder, eyre::Report> {
        self.record
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing record in scenario world"))
    }
}

impl Default for FaultResolutionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> FaultResolutionWorld {
    FaultResolutionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
