//! In-memory work order repository for tests.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::domain::{SectionId, TechnicianId};
use crate::ledger::{
    domain::{Attachment, DateWindow, FaultFilter, WorkOrder, WorkOrderId},
    ports::{WorkOrderRepository, WorkOrderRepositoryError, WorkOrderRepositoryResult},
};

/// Thread-safe in-memory work order repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkOrderRepository {
    state: Arc<RwLock<InMemoryLedgerState>>,
}

#[derive(Debug, Default)]
struct InMemoryLedgerState {
    work_orders: HashMap<WorkOrderId, WorkOrder>,
    attachments: Vec<Attachment>,
    filenames: HashSet<String>,
}

impl InMemoryLedgerState {
    fn claim_filenames(&mut self, attachments: &[Attachment]) -> WorkOrderRepositoryResult<()> {
        let taken = attachments
            .iter()
            .find(|attachment| self.filenames.contains(attachment.filename()));
        if let Some(attachment) = taken {
            return Err(WorkOrderRepositoryError::persistence(std::io::Error::other(
                format!("attachment filename already recorded: {}", attachment.filename()),
            )));
        }
        for attachment in attachments {
            self.filenames.insert(attachment.filename().to_owned());
            self.attachments.push(attachment.clone());
        }
        Ok(())
    }

    fn collect<F>(&self, mut keep: F, limit: Option<usize>) -> Vec<WorkOrder>
    where
        F: FnMut(&WorkOrder) -> bool,
    {
        let mut matching: Vec<WorkOrder> = self
            .work_orders
            .values()
            .filter(|order| keep(order))
            .cloned()
            .collect();
        matching.sort_by(newest_first);
        if let Some(max) = limit {
            matching.truncate(max);
        }
        matching
    }
}

fn newest_first(left: &WorkOrder, right: &WorkOrder) -> Ordering {
    right
        .date()
        .cmp(&left.date())
        .then_with(|| right.created_at().cmp(&left.created_at()))
        .then_with(|| right.id().cmp(&left.id()))
}

impl InMemoryWorkOrderRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> WorkOrderRepositoryResult<RwLockReadGuard<'_, InMemoryLedgerState>> {
        self.state.read().map_err(|err| {
            WorkOrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> WorkOrderRepositoryResult<RwLockWriteGuard<'_, InMemoryLedgerState>> {
        self.state.write().map_err(|err| {
            WorkOrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl WorkOrderRepository for InMemoryWorkOrderRepository {
    async fn insert(
        &self,
        work_order: &WorkOrder,
        attachments: &[Attachment],
    ) -> WorkOrderRepositoryResult<()> {
        let mut state = self.write()?;
        if state.work_orders.contains_key(&work_order.id()) {
            return Err(WorkOrderRepositoryError::DuplicateWorkOrder(work_order.id()));
        }
        state.claim_filenames(attachments)?;
        state.work_orders.insert(work_order.id(), work_order.clone());
        Ok(())
    }

    async fn resolve(
        &self,
        work_order: &WorkOrder,
        attachments: &[Attachment],
    ) -> WorkOrderRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .work_orders
            .get(&work_order.id())
            .ok_or(WorkOrderRepositoryError::NotFound(work_order.id()))?;
        if stored.is_resolved() {
            return Err(WorkOrderRepositoryError::AlreadyResolved(work_order.id()));
        }
        state.claim_filenames(attachments)?;
        state.work_orders.insert(work_order.id(), work_order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WorkOrderId) -> WorkOrderRepositoryResult<Option<WorkOrder>> {
        Ok(self.read()?.work_orders.get(&id).cloned())
    }

    async fn list_for_section(
        &self,
        section_id: SectionId,
        limit: usize,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let state = self.read()?;
        Ok(state.collect(|order| order.section_id() == section_id, Some(limit)))
    }

    async fn list_for_technician(
        &self,
        technician_id: TechnicianId,
        limit: usize,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let state = self.read()?;
        Ok(state.collect(
            |order| order.technician_id() == Some(technician_id),
            Some(limit),
        ))
    }

    async fn list_in_range(
        &self,
        window: &DateWindow,
        section_id: Option<SectionId>,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let state = self.read()?;
        Ok(state.collect(
            |order| {
                window.contains(order.date())
                    && section_id.is_none_or(|wanted| order.section_id() == wanted)
            },
            None,
        ))
    }

    async fn list_fault_reports(
        &self,
        filter: FaultFilter,
        limit: Option<usize>,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let state = self.read()?;
        Ok(state.collect(
            |order| {
                order.work_type().is_fault_report()
                    && order.is_resolved() == filter.resolved_flag()
            },
            limit,
        ))
    }

    async fn list_attachments(
        &self,
        work_order_id: WorkOrderId,
    ) -> WorkOrderRepositoryResult<Vec<Attachment>> {
        let state = self.read()?;
        let mut attachments: Vec<Attachment> = state
            .attachments
            .iter()
            .filter(|attachment| attachment.work_order_id() == work_order_id)
            .cloned()
            .collect();
        attachments.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.filename().cmp(right.filename()))
        });
        Ok(attachments)
    }
}
