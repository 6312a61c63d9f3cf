//! Domain model for maintenance records, their resolution, and evidence.

mod attachment;
mod error;
mod ids;
mod query;
mod text;
mod work_order;

pub use attachment::{Attachment, PersistedAttachmentData};
pub use error::LedgerDomainError;
pub use ids::{AttachmentId, WorkOrderId};
pub use query::{DateWindow, FaultFilter};
pub use text::{FAULT_REPORT, Narrative, WorkType};
pub use work_order::{PersistedWorkOrderData, Resolution, WorkDetails, WorkOrder};
