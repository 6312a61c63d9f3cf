//! Pending-to-resolved transition for fault reports.
//!
//! A record is resolved at most once. The domain transition rejects records
//! that are no longer pending, and the repository applies the change only
//! while the stored row is still pending, so two administrators racing on
//! the same record cannot both succeed.

use super::ledger::{link_attachments, warn_orphans};
use crate::attachment::{
    domain::UploadedFile,
    ports::BlobStore,
    services::{AttachmentError, AttachmentStore},
};
use crate::error::ErrorKind;
use crate::ledger::{
    domain::{LedgerDomainError, Narrative, WorkOrder, WorkOrderId},
    ports::{WorkOrderRepository, WorkOrderRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for [`ResolutionWorkflow::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    work_order_id: WorkOrderId,
    description: String,
    files: Vec<UploadedFile>,
}

impl ResolveRequest {
    /// Creates a request resolving `work_order_id` with a narrative.
    #[must_use]
    pub fn new(work_order_id: WorkOrderId, description: impl Into<String>) -> Self {
        Self {
            work_order_id,
            description: description.into(),
            files: Vec::new(),
        }
    }

    /// Attaches evidence of the fix.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = UploadedFile>) -> Self {
        self.files = files.into_iter().collect();
        self
    }
}

/// Errors returned by the resolution workflow.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The narrative was blank or the record was not pending.
    #[error(transparent)]
    Domain(#[from] LedgerDomainError),
    /// No record has the id.
    #[error("work order not found: {0}")]
    NotFound(WorkOrderId),
    /// Evidence could not be staged.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    /// Persistence failed.
    #[error(transparent)]
    Repository(#[from] WorkOrderRepositoryError),
}

impl ResolutionError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(LedgerDomainError::AlreadyResolved(_))
            | Self::Repository(WorkOrderRepositoryError::AlreadyResolved(_)) => {
                ErrorKind::AlreadyResolved
            }
            Self::Domain(_) => ErrorKind::ValidationFailure,
            Self::NotFound(_) | Self::Repository(WorkOrderRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Attachment(err) => err.kind(),
            Self::Repository(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for resolution operations.
pub type ResolutionResult<T> = Result<T, ResolutionError>;

/// Resolves pending fault reports.
#[derive(Clone)]
pub struct ResolutionWorkflow<W, B, C>
where
    W: WorkOrderRepository,
    B: BlobStore + 'static,
    C: Clock + Send + Sync,
{
    work_orders: Arc<W>,
    attachments: AttachmentStore<B>,
    clock: Arc<C>,
}

impl<W, B, C> ResolutionWorkflow<W, B, C>
where
    W: WorkOrderRepository,
    B: BlobStore + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new resolution workflow.
    #[must_use]
    pub const fn new(work_orders: Arc<W>, attachments: AttachmentStore<B>, clock: Arc<C>) -> Self {
        Self {
            work_orders,
            attachments,
            clock,
        }
    }

    /// Resolves a pending record with a narrative and optional evidence.
    ///
    /// The record is checked before any evidence is written, so a rejected
    /// call leaves no files behind.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NotFound`] for an unknown id,
    /// [`ResolutionError::Domain`] for a blank narrative or a record that is
    /// not pending, and [`ResolutionError::Attachment`] or
    /// [`ResolutionError::Repository`] when storage fails.
    pub async fn resolve(&self, request: ResolveRequest) -> ResolutionResult<WorkOrder> {
        let ResolveRequest {
            work_order_id,
            description,
            files,
        } = request;
        let narrative = Narrative::new("resolution", description)?;
        let mut work_order = self
            .work_orders
            .find_by_id(work_order_id)
            .await?
            .ok_or(ResolutionError::NotFound(work_order_id))?;

        if let Err(err) = work_order.resolve(narrative, &*self.clock) {
            warn!(work_order_id = %work_order_id, "rejected resolution of non-pending record");
            return Err(err.into());
        }

        let stored = self.attachments.stage(files).await?;
        let evidence = link_attachments(work_order_id, stored, &*self.clock);
        if let Err(err) = self.work_orders.resolve(&work_order, &evidence).await {
            warn_orphans(&evidence, &err);
            return Err(err.into());
        }

        info!(
            work_order_id = %work_order_id,
            evidence = evidence.len(),
            "resolved work order"
        );
        Ok(work_order)
    }
}
