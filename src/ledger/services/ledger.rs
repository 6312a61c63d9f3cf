//! Service layer for filing and querying maintenance records.

use super::request::CreateRecordRequest;
use super::view::{RecordView, build_views};
use crate::attachment::{
    domain::StoredFile,
    ports::BlobStore,
    services::{AttachmentError, AttachmentStore},
};
use crate::catalog::{
    domain::{Section, TechnicianId},
    ports::{CatalogRepository, CatalogRepositoryError},
    services::section_by_raw_code,
};
use crate::error::ErrorKind;
use crate::ledger::{
    domain::{
        Attachment, DateWindow, FaultFilter, LedgerDomainError, Narrative, WorkDetails, WorkOrder,
        WorkOrderId, WorkType,
    },
    ports::{WorkOrderRepository, WorkOrderRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for record operations.
#[derive(Debug, Error)]
pub enum LedgerServiceError {
    /// Input was rejected by the domain.
    #[error(transparent)]
    Domain(#[from] LedgerDomainError),
    /// No section has the code.
    #[error("section code not found: {0}")]
    UnknownSection(String),
    /// No technician has the id.
    #[error("technician not found: {0}")]
    UnknownTechnician(TechnicianId),
    /// Evidence could not be staged or read.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    /// Record persistence failed.
    #[error(transparent)]
    Repository(#[from] WorkOrderRepositoryError),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
}

impl LedgerServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(LedgerDomainError::AlreadyResolved(_))
            | Self::Repository(WorkOrderRepositoryError::AlreadyResolved(_)) => {
                ErrorKind::AlreadyResolved
            }
            Self::Domain(_) => ErrorKind::ValidationFailure,
            Self::UnknownSection(_)
            | Self::UnknownTechnician(_)
            | Self::Repository(WorkOrderRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Attachment(err) => err.kind(),
            Self::Repository(_) | Self::Catalog(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for record service operations.
pub type LedgerServiceResult<T> = Result<T, LedgerServiceError>;

/// Record ledger orchestration service.
#[derive(Clone)]
pub struct LedgerService<W, K, B, C>
where
    W: WorkOrderRepository,
    K: CatalogRepository,
    B: BlobStore + 'static,
    C: Clock + Send + Sync,
{
    work_orders: Arc<W>,
    catalog: Arc<K>,
    attachments: AttachmentStore<B>,
    clock: Arc<C>,
}

impl<W, K, B, C> LedgerService<W, K, B, C>
where
    W: WorkOrderRepository,
    K: CatalogRepository,
    B: BlobStore + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new ledger service.
    #[must_use]
    pub const fn new(
        work_orders: Arc<W>,
        catalog: Arc<K>,
        attachments: AttachmentStore<B>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            work_orders,
            catalog,
            attachments,
            clock,
        }
    }

    /// Files a maintenance record with its evidence.
    ///
    /// A record of type [`crate::ledger::domain::FAULT_REPORT`] starts
    /// pending; every other type starts closed. All input is validated before
    /// any file is written, and the record is committed together with its
    /// attachment rows.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::UnknownSection`] or
    /// [`LedgerServiceError::UnknownTechnician`] for dangling references,
    /// [`LedgerServiceError::Domain`] for blank text, and
    /// [`LedgerServiceError::Attachment`] or
    /// [`LedgerServiceError::Repository`] when storage fails.
    pub async fn create_record(&self, request: CreateRecordRequest) -> LedgerServiceResult<WorkOrder> {
        let CreateRecordRequest {
            section_code,
            technician_id,
            work_type,
            failure_type,
            component,
            description,
            downtime_minutes,
            machine_stopped,
            files,
        } = request;

        let details = WorkDetails {
            technician_id,
            work_type: WorkType::new(work_type)?,
            failure_type,
            component,
            description: Narrative::new("description", description)?,
            downtime_minutes,
            machine_stopped,
        };
        let section = self.require_section(&section_code).await?;
        if let Some(id) = technician_id {
            self.require_technician(id).await?;
        }
        let work_order = WorkOrder::new(section.id(), details, &*self.clock)?;

        let stored = self.attachments.stage(files).await?;
        let attachments = link_attachments(work_order.id(), stored, &*self.clock);
        if let Err(err) = self.work_orders.insert(&work_order, &attachments).await {
            warn_orphans(&attachments, &err);
            return Err(err.into());
        }

        info!(
            work_order_id = %work_order.id(),
            code = %section.code(),
            work_type = %work_order.work_type(),
            resolved = work_order.is_resolved(),
            attachments = attachments.len(),
            "filed work order"
        );
        Ok(work_order)
    }

    /// Returns the most recent records of a section, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::UnknownSection`] when no section has the
    /// code.
    pub async fn records_for_section(
        &self,
        section_code: &str,
        limit: usize,
    ) -> LedgerServiceResult<Vec<RecordView>> {
        let section = self.require_section(section_code).await?;
        let records = self
            .work_orders
            .list_for_section(section.id(), limit)
            .await?;
        debug!(code = %section.code(), count = records.len(), "listed section records");
        self.views(records).await
    }

    /// Returns the most recent records of a technician, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::UnknownTechnician`] when no technician
    /// has the id.
    pub async fn records_for_technician(
        &self,
        technician_id: TechnicianId,
        limit: usize,
    ) -> LedgerServiceResult<Vec<RecordView>> {
        self.require_technician(technician_id).await?;
        let records = self
            .work_orders
            .list_for_technician(technician_id, limit)
            .await?;
        self.views(records).await
    }

    /// Returns records dated between two `YYYY-MM-DD` days inclusive,
    /// newest first, optionally for one section.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Domain`] when a day is unparsable or
    /// `from` is after `to`, and [`LedgerServiceError::UnknownSection`] for
    /// an unknown section code.
    pub async fn records_in_range(
        &self,
        from: &str,
        to: &str,
        section_code: Option<&str>,
    ) -> LedgerServiceResult<Vec<RecordView>> {
        let window = DateWindow::parse(from, to)?;
        let section_id = match section_code {
            Some(code) => Some(self.require_section(code).await?.id()),
            None => None,
        };
        let records = self.work_orders.list_in_range(&window, section_id).await?;
        debug!(from = %window.from(), to = %window.to(), count = records.len(), "listed records in range");
        self.views(records).await
    }

    /// Finds one record with its reporting view.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Repository`] or
    /// [`LedgerServiceError::Catalog`] when lookup fails.
    pub async fn find_record(&self, id: WorkOrderId) -> LedgerServiceResult<Option<RecordView>> {
        let Some(record) = self.work_orders.find_by_id(id).await? else {
            return Ok(None);
        };
        Ok(self.views(vec![record]).await?.pop())
    }

    /// Returns the fault-report triage queue, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Repository`] when lookup fails.
    pub async fn fault_reports(
        &self,
        filter: FaultFilter,
        limit: Option<usize>,
    ) -> LedgerServiceResult<Vec<RecordView>> {
        let records = self.work_orders.list_fault_reports(filter, limit).await?;
        self.views(records).await
    }

    /// Returns the evidence of a record ordered by upload minute, then
    /// stored filename.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Repository`] when lookup fails.
    pub async fn attachments(&self, id: WorkOrderId) -> LedgerServiceResult<Vec<Attachment>> {
        Ok(self.work_orders.list_attachments(id).await?)
    }

    /// Reads an evidence payload by its stored name.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Attachment`] when the name is invalid
    /// or nothing is stored under it.
    pub async fn open_attachment(&self, filename: &str) -> LedgerServiceResult<Vec<u8>> {
        Ok(self.attachments.open(filename).await?)
    }

    async fn require_section(&self, code: &str) -> LedgerServiceResult<Section> {
        section_by_raw_code(self.catalog.as_ref(), code)
            .await?
            .ok_or_else(|| LedgerServiceError::UnknownSection(code.to_owned()))
    }

    async fn require_technician(&self, id: TechnicianId) -> LedgerServiceResult<()> {
        match self.catalog.find_technician(id).await? {
            Some(_) => Ok(()),
            None => Err(LedgerServiceError::UnknownTechnician(id)),
        }
    }

    async fn views(&self, records: Vec<WorkOrder>) -> LedgerServiceResult<Vec<RecordView>> {
        Ok(build_views(self.catalog.as_ref(), records).await?)
    }
}

pub(super) fn link_attachments(
    work_order_id: WorkOrderId,
    stored: Vec<StoredFile>,
    clock: &impl Clock,
) -> Vec<Attachment> {
    stored
        .into_iter()
        .map(|file| Attachment::new(work_order_id, file, clock))
        .collect()
}

pub(super) fn warn_orphans(attachments: &[Attachment], err: &WorkOrderRepositoryError) {
    for attachment in attachments {
        warn!(
            filename = attachment.filename(),
            error = %err,
            "stored file left without a record"
        );
    }
}
