//! Sub-part of a section offered when filing a record.

use super::{CatalogName, CatalogStatus, ComponentId, SectionCode};
use serde::{Deserialize, Serialize};

/// Component scoped to a single section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    id: ComponentId,
    section_code: SectionCode,
    name: CatalogName,
    status: CatalogStatus,
}

/// Parameter object for reconstructing a persisted component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedComponentData {
    /// Persisted component identifier.
    pub id: ComponentId,
    /// Code of the owning section.
    pub section_code: SectionCode,
    /// Persisted display name.
    pub name: CatalogName,
    /// Persisted membership status.
    pub status: CatalogStatus,
}

impl Component {
    /// Creates a new active component for the given section.
    #[must_use]
    pub fn new(section_code: SectionCode, name: CatalogName) -> Self {
        Self {
            id: ComponentId::new(),
            section_code,
            name,
            status: CatalogStatus::Active,
        }
    }

    /// Reconstructs a component from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedComponentData) -> Self {
        Self {
            id: data.id,
            section_code: data.section_code,
            name: data.name,
            status: data.status,
        }
    }

    /// Returns the component identifier.
    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the owning section code.
    #[must_use]
    pub const fn section_code(&self) -> &SectionCode {
        &self.section_code
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CatalogName {
        &self.name
    }

    /// Returns the membership status.
    #[must_use]
    pub const fn status(&self) -> CatalogStatus {
        self.status
    }

    /// Retires the component. There is no way back to `Active`.
    pub const fn retire(&mut self) {
        self.status = CatalogStatus::Retired;
    }
}
