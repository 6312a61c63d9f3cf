//! Repository port for sections, technicians, and components.

use crate::catalog::domain::{
    CatalogName, Component, ComponentId, Listing, Section, SectionCode, SectionId, Technician,
    TechnicianId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog repository operations.
pub type CatalogRepositoryResult<T> = Result<T, CatalogRepositoryError>;

/// Catalog persistence contract.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Inserts a section unless one with the same code already exists.
    ///
    /// Returns `true` when the row was inserted and `false` when the code was
    /// already registered. An existing row is never modified.
    async fn insert_section_if_absent(&self, section: &Section) -> CatalogRepositoryResult<bool>;

    /// Persists the mutable fields (name, description) of a section.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::SectionNotFound`] when the section
    /// does not exist.
    async fn update_section(&self, section: &Section) -> CatalogRepositoryResult<()>;

    /// Finds a section by internal identifier.
    async fn find_section(&self, id: SectionId) -> CatalogRepositoryResult<Option<Section>>;

    /// Finds a section by external code.
    async fn find_section_by_code(
        &self,
        code: &SectionCode,
    ) -> CatalogRepositoryResult<Option<Section>>;

    /// Returns every section ordered by name.
    async fn list_sections(&self) -> CatalogRepositoryResult<Vec<Section>>;

    /// Stores a new technician.
    async fn insert_technician(&self, technician: &Technician) -> CatalogRepositoryResult<()>;

    /// Persists the status of an existing technician.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::TechnicianNotFound`] when the
    /// technician does not exist.
    async fn update_technician(&self, technician: &Technician) -> CatalogRepositoryResult<()>;

    /// Finds a technician by identifier regardless of status.
    async fn find_technician(
        &self,
        id: TechnicianId,
    ) -> CatalogRepositoryResult<Option<Technician>>;

    /// Returns every technician with exactly this name, regardless of status.
    async fn find_technicians_by_name(
        &self,
        name: &CatalogName,
    ) -> CatalogRepositoryResult<Vec<Technician>>;

    /// Returns technicians in the requested listing mode.
    async fn list_technicians(&self, listing: Listing) -> CatalogRepositoryResult<Vec<Technician>>;

    /// Stores a new component.
    async fn insert_component(&self, component: &Component) -> CatalogRepositoryResult<()>;

    /// Persists the status of an existing component.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::ComponentNotFound`] when the
    /// component does not exist.
    async fn update_component(&self, component: &Component) -> CatalogRepositoryResult<()>;

    /// Finds a component by identifier regardless of status.
    async fn find_component(&self, id: ComponentId) -> CatalogRepositoryResult<Option<Component>>;

    /// Returns the components of one section in the requested listing mode.
    async fn list_components(
        &self,
        section_code: &SectionCode,
        listing: Listing,
    ) -> CatalogRepositoryResult<Vec<Component>>;
}

/// Errors returned by catalog repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogRepositoryError {
    /// The section was not found.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// The technician was not found.
    #[error("technician not found: {0}")]
    TechnicianNotFound(TechnicianId),

    /// The component was not found.
    #[error("component not found: {0}")]
    ComponentNotFound(ComponentId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
