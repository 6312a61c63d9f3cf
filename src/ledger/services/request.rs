//! Request payload for filing a maintenance record.

use crate::attachment::domain::UploadedFile;
use crate::catalog::domain::TechnicianId;
use crate::text::non_blank;

/// Request payload for [`super::LedgerService::create_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    pub(super) section_code: String,
    pub(super) technician_id: Option<TechnicianId>,
    pub(super) work_type: String,
    pub(super) failure_type: Option<String>,
    pub(super) component: Option<String>,
    pub(super) description: String,
    pub(super) downtime_minutes: u32,
    pub(super) machine_stopped: bool,
    pub(super) files: Vec<UploadedFile>,
}

impl CreateRecordRequest {
    /// Creates a request with the mandatory fields.
    #[must_use]
    pub fn new(
        section_code: impl Into<String>,
        work_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            section_code: section_code.into(),
            technician_id: None,
            work_type: work_type.into(),
            failure_type: None,
            component: None,
            description: description.into(),
            downtime_minutes: 0,
            machine_stopped: false,
            files: Vec::new(),
        }
    }

    /// Names the technician filing the record.
    #[must_use]
    pub const fn with_technician(mut self, technician_id: TechnicianId) -> Self {
        self.technician_id = Some(technician_id);
        self
    }

    /// Sets the failure classification. Blank values are dropped.
    #[must_use]
    pub fn with_failure_type(mut self, failure_type: impl Into<String>) -> Self {
        self.failure_type = non_blank(failure_type.into());
        self
    }

    /// Sets the component name. Blank values are dropped.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = non_blank(component.into());
        self
    }

    /// Sets the downtime in minutes.
    #[must_use]
    pub const fn with_downtime_minutes(mut self, minutes: u32) -> Self {
        self.downtime_minutes = minutes;
        self
    }

    /// Marks whether the machine had to stop.
    #[must_use]
    pub const fn with_machine_stopped(mut self, stopped: bool) -> Self {
        self.machine_stopped = stopped;
        self
    }

    /// Attaches evidence files.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = UploadedFile>) -> Self {
        self.files = files.into_iter().collect();
        self
    }
}
