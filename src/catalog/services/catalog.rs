//! Service layer for section registration and technician/component rosters.

use super::seed::{SeedPlan, SeedReport};
use crate::catalog::{
    domain::{
        CatalogDomainError, CatalogName, Component, ComponentId, Listing, Section, SectionCode,
        SectionId, Technician, TechnicianId,
    },
    ports::{CatalogRepository, CatalogRepositoryError},
};
use crate::error::ErrorKind;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CatalogDomainError),
    /// No section is registered under the code.
    #[error("section code not found: {0}")]
    UnknownSectionCode(SectionCode),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CatalogRepositoryError),
}

impl CatalogServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailure,
            Self::UnknownSectionCode(_)
            | Self::Repository(
                CatalogRepositoryError::SectionNotFound(_)
                | CatalogRepositoryError::TechnicianNotFound(_)
                | CatalogRepositoryError::ComponentNotFound(_),
            ) => ErrorKind::NotFound,
            Self::Repository(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for catalog service operations.
pub type CatalogServiceResult<T> = Result<T, CatalogServiceError>;

/// Catalog orchestration service.
#[derive(Clone)]
pub struct CatalogService<R>
where
    R: CatalogRepository,
{
    repository: Arc<R>,
}

impl<R> CatalogService<R>
where
    R: CatalogRepository,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a section unless its code is already taken.
    ///
    /// Returns `true` when a row was created. A duplicate code is a silent
    /// no-op: the existing row keeps its name and description.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Domain`] when the code or name is
    /// invalid, or [`CatalogServiceError::Repository`] when persistence fails.
    pub async fn upsert_section(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> CatalogServiceResult<bool> {
        let section = Section::new(SectionCode::new(code)?, CatalogName::new(name)?, description);
        let inserted = self.repository.insert_section_if_absent(&section).await?;
        if inserted {
            info!(code = %section.code(), section_id = %section.id(), "registered section");
        } else {
            debug!(code = %section.code(), "section already registered");
        }
        Ok(inserted)
    }

    /// Overwrites a section's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Domain`] when the name is empty or
    /// [`CatalogServiceError::Repository`] when the section does not exist.
    pub async fn edit_section(
        &self,
        id: SectionId,
        name: &str,
        description: &str,
    ) -> CatalogServiceResult<Section> {
        let new_name = CatalogName::new(name)?;
        let mut section = self
            .repository
            .find_section(id)
            .await?
            .ok_or(CatalogRepositoryError::SectionNotFound(id))?;
        section.edit(new_name, description);
        self.repository.update_section(&section).await?;
        info!(code = %section.code(), "edited section");
        Ok(section)
    }

    /// Finds a section by code.
    ///
    /// Returns `Ok(None)` when no section has the code.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Domain`] when the code is malformed or
    /// [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn find_section_by_code(&self, code: &str) -> CatalogServiceResult<Option<Section>> {
        let normalized = SectionCode::new(code)?;
        Ok(self.repository.find_section_by_code(&normalized).await?)
    }

    /// Finds a section by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn find_section(&self, id: SectionId) -> CatalogServiceResult<Option<Section>> {
        Ok(self.repository.find_section(id).await?)
    }

    /// Returns the section for a code or [`CatalogServiceError::UnknownSectionCode`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::UnknownSectionCode`] when no section has
    /// the code, plus the errors of [`Self::find_section_by_code`].
    pub async fn section_by_code(&self, code: &str) -> CatalogServiceResult<Section> {
        let normalized = SectionCode::new(code)?;
        self.repository
            .find_section_by_code(&normalized)
            .await?
            .ok_or(CatalogServiceError::UnknownSectionCode(normalized))
    }

    /// Returns every section ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn list_sections(&self) -> CatalogServiceResult<Vec<Section>> {
        Ok(self.repository.list_sections().await?)
    }

    /// Adds a new active technician. Names are not merged with existing rows.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Domain`] when the name is empty or
    /// [`CatalogServiceError::Repository`] when persistence fails.
    pub async fn add_technician(
        &self,
        name: &str,
        role: Option<&str>,
    ) -> CatalogServiceResult<Technician> {
        let technician = Technician::new(CatalogName::new(name)?, role.map(str::to_owned));
        self.repository.insert_technician(&technician).await?;
        info!(technician_id = %technician.id(), name = %technician.name(), "added technician");
        Ok(technician)
    }

    /// Retires a technician. Retired technicians stay resolvable by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when the technician does
    /// not exist or persistence fails.
    pub async fn deactivate_technician(&self, id: TechnicianId) -> CatalogServiceResult<Technician> {
        let mut technician = self
            .repository
            .find_technician(id)
            .await?
            .ok_or(CatalogRepositoryError::TechnicianNotFound(id))?;
        technician.retire();
        self.repository.update_technician(&technician).await?;
        info!(technician_id = %id, "retired technician");
        Ok(technician)
    }

    /// Finds a technician by id regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn find_technician(
        &self,
        id: TechnicianId,
    ) -> CatalogServiceResult<Option<Technician>> {
        Ok(self.repository.find_technician(id).await?)
    }

    /// Returns technicians in the requested listing mode.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn list_technicians(&self, listing: Listing) -> CatalogServiceResult<Vec<Technician>> {
        Ok(self.repository.list_technicians(listing).await?)
    }

    /// Adds a new active component to an existing section.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::UnknownSectionCode`] when the section
    /// does not exist, [`CatalogServiceError::Domain`] for invalid input, or
    /// [`CatalogServiceError::Repository`] when persistence fails.
    pub async fn add_component(
        &self,
        section_code: &str,
        name: &str,
    ) -> CatalogServiceResult<Component> {
        let component_name = CatalogName::new(name)?;
        let section = self.section_by_code(section_code).await?;
        let component = Component::new(section.code().clone(), component_name);
        self.repository.insert_component(&component).await?;
        info!(
            component_id = %component.id(),
            code = %section.code(),
            name = %component.name(),
            "added component"
        );
        Ok(component)
    }

    /// Retires a component.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Repository`] when the component does
    /// not exist or persistence fails.
    pub async fn deactivate_component(&self, id: ComponentId) -> CatalogServiceResult<Component> {
        let mut component = self
            .repository
            .find_component(id)
            .await?
            .ok_or(CatalogRepositoryError::ComponentNotFound(id))?;
        component.retire();
        self.repository.update_component(&component).await?;
        info!(component_id = %id, "retired component");
        Ok(component)
    }

    /// Returns the components of a section in the requested listing mode.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Domain`] when the code is malformed or
    /// [`CatalogServiceError::Repository`] when lookup fails.
    pub async fn list_components(
        &self,
        section_code: &str,
        listing: Listing,
    ) -> CatalogServiceResult<Vec<Component>> {
        let code = SectionCode::new(section_code)?;
        Ok(self.repository.list_components(&code, listing).await?)
    }

    /// Registers the default line sections.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::seed`].
    pub async fn seed_defaults(&self) -> CatalogServiceResult<SeedReport> {
        self.seed(&SeedPlan::default_line()).await
    }

    /// Applies a seed plan idempotently.
    ///
    /// Sections go through [`Self::upsert_section`]; a technician is only
    /// added when no technician with the same name exists yet.
    ///
    /// # Errors
    ///
    /// Returns the first validation or persistence failure.
    pub async fn seed(&self, plan: &SeedPlan) -> CatalogServiceResult<SeedReport> {
        let mut report = SeedReport::default();
        for section in &plan.sections {
            if self
                .upsert_section(&section.code, &section.name, &section.description)
                .await?
            {
                report.sections_added += 1;
            }
        }
        for entry in &plan.technicians {
            let name = CatalogName::new(entry.name.as_str())?;
            if self
                .repository
                .find_technicians_by_name(&name)
                .await?
                .is_empty()
            {
                self.add_technician(name.as_str(), entry.role.as_deref())
                    .await?;
                report.technicians_added += 1;
            }
        }
        info!(
            sections_added = report.sections_added,
            technicians_added = report.technicians_added,
            "seeded catalog"
        );
        Ok(report)
    }
}
