//! Technician catalog entry.

use super::{CatalogName, CatalogStatus, TechnicianId};
use crate::text::non_blank;
use serde::{Deserialize, Serialize};

/// Person who files maintenance records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    id: TechnicianId,
    name: CatalogName,
    role: Option<String>,
    status: CatalogStatus,
}

/// Parameter object for reconstructing a persisted technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTechnicianData {
    /// Persisted technician identifier.
    pub id: TechnicianId,
    /// Persisted display name.
    pub name: CatalogName,
    /// Persisted role label, if any.
    pub role: Option<String>,
    /// Persisted membership status.
    pub status: CatalogStatus,
}

impl Technician {
    /// Creates a new active technician.
    ///
    /// A blank role is stored as `None`.
    #[must_use]
    pub fn new(name: CatalogName, role: Option<String>) -> Self {
        Self {
            id: TechnicianId::new(),
            name,
            role: role.and_then(non_blank),
            status: CatalogStatus::Active,
        }
    }

    /// Reconstructs a technician from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTechnicianData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            role: data.role,
            status: data.status,
        }
    }

    /// Returns the technician identifier.
    #[must_use]
    pub const fn id(&self) -> TechnicianId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CatalogName {
        &self.name
    }

    /// Returns the role label, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns the membership status.
    #[must_use]
    pub const fn status(&self) -> CatalogStatus {
        self.status
    }

    /// Retires the technician. There is no way back to `Active`.
    pub const fn retire(&mut self) {
        self.status = CatalogStatus::Retired;
    }
}
