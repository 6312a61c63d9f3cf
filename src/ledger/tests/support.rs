//! Shared harness for ledger service tests.

use std::sync::Arc;

use crate::attachment::{adapters::memory::InMemoryBlobStore, services::AttachmentStore};
use crate::catalog::{adapters::memory::InMemoryCatalogRepository, services::CatalogService};
use crate::ledger::{
    adapters::memory::InMemoryWorkOrderRepository,
    services::{LedgerService, ResolutionWorkflow},
};
use crate::test_support::FixedClock;

pub(super) type TestLedger =
    LedgerService<InMemoryWorkOrderRepository, InMemoryCatalogRepository, InMemoryBlobStore, FixedClock>;
pub(super) type TestWorkflow =
    ResolutionWorkflow<InMemoryWorkOrderRepository, InMemoryBlobStore, FixedClock>;

pub(super) struct Harness {
    pub catalog: CatalogService<InMemoryCatalogRepository>,
    pub ledger: TestLedger,
    pub workflow: TestWorkflow,
    pub blobs: InMemoryBlobStore,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub(super) fn new() -> Self {
        let catalog_repo = Arc::new(InMemoryCatalogRepository::new());
        let work_orders = Arc::new(InMemoryWorkOrderRepository::new());
        let blobs = InMemoryBlobStore::new();
        let store = AttachmentStore::new(Arc::new(blobs.clone()));
        let clock = Arc::new(FixedClock::at("2024-01-15T08:30"));
        Self {
            catalog: CatalogService::new(Arc::clone(&catalog_repo)),
            ledger: LedgerService::new(
                Arc::clone(&work_orders),
                catalog_repo,
                store.clone(),
                Arc::clone(&clock),
            ),
            workflow: ResolutionWorkflow::new(work_orders, store, Arc::clone(&clock)),
            blobs,
            clock,
        }
    }

    pub(super) async fn with_pump() -> Self {
        let harness = Self::new();
        harness
            .catalog
            .upsert_section("PUMP1", "Pump", "desc")
            .await
            .expect("seed section");
        harness
    }
}
