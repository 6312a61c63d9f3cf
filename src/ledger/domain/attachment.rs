//! Evidence file linked to a work order.

use super::{AttachmentId, WorkOrderId};
use crate::attachment::domain::StoredFile;
use crate::stamp::MinuteStamp;
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A stored evidence file belonging to one work order. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    work_order_id: WorkOrderId,
    file: StoredFile,
    created_at: MinuteStamp,
}

/// Parameter object for reconstructing a persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAttachmentData {
    /// Persisted identifier.
    pub id: AttachmentId,
    /// Persisted owning record.
    pub work_order_id: WorkOrderId,
    /// Persisted file metadata.
    pub file: StoredFile,
    /// Persisted creation stamp.
    pub created_at: MinuteStamp,
}

impl Attachment {
    /// Links a stored file to a work order.
    #[must_use]
    pub fn new(work_order_id: WorkOrderId, file: StoredFile, clock: &impl Clock) -> Self {
        Self {
            id: AttachmentId::new(),
            work_order_id,
            file,
            created_at: MinuteStamp::now(clock),
        }
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAttachmentData) -> Self {
        Self {
            id: data.id,
            work_order_id: data.work_order_id,
            file: data.file,
            created_at: data.created_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning record.
    #[must_use]
    pub const fn work_order_id(&self) -> WorkOrderId {
        self.work_order_id
    }

    /// Returns the stored file metadata.
    #[must_use]
    pub const fn file(&self) -> &StoredFile {
        &self.file
    }

    /// Returns the name the payload is stored under.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.file.filename
    }

    /// Returns the creation stamp.
    #[must_use]
    pub const fn created_at(&self) -> MinuteStamp {
        self.created_at
    }
}
