//! Work order aggregate root and its resolution state.

use super::{LedgerDomainError, Narrative, WorkOrderId, WorkType};
use crate::catalog::domain::{SectionId, TechnicianId};
use crate::stamp::MinuteStamp;
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Largest downtime the storage column can hold.
const MAX_DOWNTIME_MINUTES: u32 = i32::MAX.unsigned_abs();

/// Where a record stands in the resolve-once lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resolution {
    /// A fault report awaiting resolution.
    Pending,
    /// Completed work that needed no follow-up.
    ClosedOnEntry,
    /// A fault report that has been resolved.
    Resolved {
        /// What was done to resolve the fault.
        description: Narrative,
        /// When the resolution was recorded.
        resolved_at: MinuteStamp,
    },
}

impl Resolution {
    /// Returns the starting state for a record of `work_type`.
    #[must_use]
    pub fn initial_for(work_type: &WorkType) -> Self {
        if work_type.is_fault_report() {
            Self::Pending
        } else {
            Self::ClosedOnEntry
        }
    }

    /// Returns `false` only while pending.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the resolution narrative, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Narrative> {
        match self {
            Self::Resolved { description, .. } => Some(description),
            Self::Pending | Self::ClosedOnEntry => None,
        }
    }

    /// Returns the resolution time, if any.
    #[must_use]
    pub const fn resolved_at(&self) -> Option<MinuteStamp> {
        match self {
            Self::Resolved { resolved_at, .. } => Some(*resolved_at),
            Self::Pending | Self::ClosedOnEntry => None,
        }
    }
}

/// Caller-supplied content of a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDetails {
    /// Technician who performed or reported the work.
    pub technician_id: Option<TechnicianId>,
    /// Record type.
    pub work_type: WorkType,
    /// Failure classification.
    pub failure_type: Option<String>,
    /// Free-text component name.
    pub component: Option<String>,
    /// What was observed or done.
    pub description: Narrative,
    /// Minutes the line was down.
    pub downtime_minutes: u32,
    /// Whether the machine had to stop.
    pub machine_stopped: bool,
}

/// A maintenance record.
///
/// Everything except the resolution is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    id: WorkOrderId,
    section_id: SectionId,
    technician_id: Option<TechnicianId>,
    date: MinuteStamp,
    work_type: WorkType,
    failure_type: Option<String>,
    component: Option<String>,
    description: Narrative,
    downtime_minutes: u32,
    machine_stopped: bool,
    created_at: MinuteStamp,
    resolution: Resolution,
}

/// Parameter object for reconstructing a persisted work order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkOrderData {
    /// Persisted identifier.
    pub id: WorkOrderId,
    /// Persisted section reference.
    pub section_id: SectionId,
    /// Persisted record content.
    pub details: WorkDetails,
    /// Persisted work date.
    pub date: MinuteStamp,
    /// Persisted creation stamp.
    pub created_at: MinuteStamp,
    /// Persisted resolution state.
    pub resolution: Resolution,
}

impl WorkOrder {
    /// Creates a record stamped with the current minute.
    ///
    /// Only a fault report starts [`Resolution::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::DowntimeOutOfRange`] when the downtime
    /// does not fit the storage column.
    pub fn new(
        section_id: SectionId,
        details: WorkDetails,
        clock: &impl Clock,
    ) -> Result<Self, LedgerDomainError> {
        if details.downtime_minutes > MAX_DOWNTIME_MINUTES {
            return Err(LedgerDomainError::DowntimeOutOfRange(
                details.downtime_minutes,
            ));
        }
        let now = MinuteStamp::now(clock);
        let resolution = Resolution::initial_for(&details.work_type);
        Ok(Self::assemble(WorkOrderId::new(), section_id, details, now, now, resolution))
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkOrderData) -> Self {
        Self::assemble(
            data.id,
            data.section_id,
            data.details,
            data.date,
            data.created_at,
            data.resolution,
        )
    }

    fn assemble(
        id: WorkOrderId,
        section_id: SectionId,
        details: WorkDetails,
        date: MinuteStamp,
        created_at: MinuteStamp,
        resolution: Resolution,
    ) -> Self {
        Self {
            id,
            section_id,
            technician_id: details.technician_id,
            date,
            work_type: details.work_type,
            failure_type: details.failure_type,
            component: details.component,
            description: details.description,
            downtime_minutes: details.downtime_minutes,
            machine_stopped: details.machine_stopped,
            created_at,
            resolution,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> WorkOrderId {
        self.id
    }

    /// Returns the section the work was done on.
    #[must_use]
    pub const fn section_id(&self) -> SectionId {
        self.section_id
    }

    /// Returns the technician, if one was named.
    #[must_use]
    pub const fn technician_id(&self) -> Option<TechnicianId> {
        self.technician_id
    }

    /// Returns the work date.
    #[must_use]
    pub const fn date(&self) -> MinuteStamp {
        self.date
    }

    /// Returns the record type.
    #[must_use]
    pub const fn work_type(&self) -> &WorkType {
        &self.work_type
    }

    /// Returns the failure classification.
    #[must_use]
    pub fn failure_type(&self) -> Option<&str> {
        self.failure_type.as_deref()
    }

    /// Returns the component name.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &Narrative {
        &self.description
    }

    /// Returns the downtime in minutes.
    #[must_use]
    pub const fn downtime_minutes(&self) -> u32 {
        self.downtime_minutes
    }

    /// Returns whether the machine stopped.
    #[must_use]
    pub const fn machine_stopped(&self) -> bool {
        self.machine_stopped
    }

    /// Returns the creation stamp.
    #[must_use]
    pub const fn created_at(&self) -> MinuteStamp {
        self.created_at
    }

    /// Returns the resolution state.
    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Returns `false` only while the record is pending.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolution.is_resolved()
    }

    /// Moves a pending record to [`Resolution::Resolved`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::AlreadyResolved`] unless the record is
    /// pending; the existing resolution is left untouched.
    pub fn resolve(
        &mut self,
        description: Narrative,
        clock: &impl Clock,
    ) -> Result<(), LedgerDomainError> {
        if self.resolution.is_resolved() {
            return Err(LedgerDomainError::AlreadyResolved(self.id));
        }
        self.resolution = Resolution::Resolved {
            description,
            resolved_at: MinuteStamp::now(clock),
        };
        Ok(())
    }
}
