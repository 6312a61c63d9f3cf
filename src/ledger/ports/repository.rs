//! Repository port for work orders and their attachments.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::domain::{SectionId, TechnicianId};
use crate::ledger::domain::{Attachment, DateWindow, FaultFilter, WorkOrder, WorkOrderId};

/// Result type for work order repository operations.
pub type WorkOrderRepositoryResult<T> = Result<T, WorkOrderRepositoryError>;

/// Persistence contract for maintenance records.
///
/// Listings are ordered by work date descending, ties broken by creation
/// stamp and then id, both descending.
#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    /// Stores a new record together with its attachments atomically.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderRepositoryError::DuplicateWorkOrder`] when the id
    /// is taken.
    async fn insert(
        &self,
        work_order: &WorkOrder,
        attachments: &[Attachment],
    ) -> WorkOrderRepositoryResult<()>;

    /// Persists a resolution and its evidence atomically.
    ///
    /// The write only applies while the stored record is still pending.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderRepositoryError::NotFound`] when the record does
    /// not exist and [`WorkOrderRepositoryError::AlreadyResolved`] when it
    /// left the pending state first.
    async fn resolve(
        &self,
        work_order: &WorkOrder,
        attachments: &[Attachment],
    ) -> WorkOrderRepositoryResult<()>;

    /// Finds a record by identifier.
    async fn find_by_id(&self, id: WorkOrderId) -> WorkOrderRepositoryResult<Option<WorkOrder>>;

    /// Returns the most recent records of one section.
    async fn list_for_section(
        &self,
        section_id: SectionId,
        limit: usize,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>>;

    /// Returns the most recent records of one technician.
    async fn list_for_technician(
        &self,
        technician_id: TechnicianId,
        limit: usize,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>>;

    /// Returns records dated inside the window, optionally for one section.
    async fn list_in_range(
        &self,
        window: &DateWindow,
        section_id: Option<SectionId>,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>>;

    /// Returns fault reports on one side of the triage queue.
    async fn list_fault_reports(
        &self,
        filter: FaultFilter,
        limit: Option<usize>,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>>;

    /// Returns the attachments of a record ordered by creation stamp, then
    /// stored filename.
    async fn list_attachments(
        &self,
        work_order_id: WorkOrderId,
    ) -> WorkOrderRepositoryResult<Vec<Attachment>>;
}

/// Errors returned by work order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkOrderRepositoryError {
    /// The record was not found.
    #[error("work order not found: {0}")]
    NotFound(WorkOrderId),

    /// A record with the same id already exists.
    #[error("duplicate work order: {0}")]
    DuplicateWorkOrder(WorkOrderId),

    /// The record was no longer pending when the resolution was written.
    #[error("work order {0} is already resolved")]
    AlreadyResolved(WorkOrderId),

    /// Persisted data could not be converted into domain types.
    #[error("invalid persisted work order data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Storage failed underneath the operation.
    #[error("work order persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkOrderRepositoryError {
    /// Wraps a conversion failure.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a storage failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
