//! In-memory catalog repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::{
    domain::{
        CatalogName, Component, ComponentId, Listing, Section, SectionCode, SectionId, Technician,
        TechnicianId,
    },
    ports::{CatalogRepository, CatalogRepositoryError, CatalogRepositoryResult},
};

/// Thread-safe in-memory catalog repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    sections: HashMap<SectionId, Section>,
    code_index: HashMap<SectionCode, SectionId>,
    technicians: HashMap<TechnicianId, Technician>,
    components: HashMap<ComponentId, Component>,
}

impl InMemoryCatalogRepository {
    /// Creates an empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CatalogRepositoryResult<RwLockReadGuard<'_, InMemoryCatalogState>> {
        self.state.read().map_err(|err| {
            CatalogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> CatalogRepositoryResult<RwLockWriteGuard<'_, InMemoryCatalogState>> {
        self.state.write().map_err(|err| {
            CatalogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn insert_section_if_absent(&self, section: &Section) -> CatalogRepositoryResult<bool> {
        let mut state = self.write()?;
        if state.code_index.contains_key(section.code()) {
            return Ok(false);
        }
        state.code_index.insert(section.code().clone(), section.id());
        state.sections.insert(section.id(), section.clone());
        Ok(true)
    }

    async fn update_section(&self, section: &Section) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .sections
            .get_mut(&section.id())
            .ok_or(CatalogRepositoryError::SectionNotFound(section.id()))?;
        stored.edit(section.name().clone(), section.description());
        Ok(())
    }

    async fn find_section(&self, id: SectionId) -> CatalogRepositoryResult<Option<Section>> {
        Ok(self.read()?.sections.get(&id).cloned())
    }

    async fn find_section_by_code(
        &self,
        code: &SectionCode,
    ) -> CatalogRepositoryResult<Option<Section>> {
        let state = self.read()?;
        Ok(state
            .code_index
            .get(code)
            .and_then(|id| state.sections.get(id))
            .cloned())
    }

    async fn list_sections(&self) -> CatalogRepositoryResult<Vec<Section>> {
        let state = self.read()?;
        let mut sections: Vec<Section> = state.sections.values().cloned().collect();
        sections.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(sections)
    }

    async fn insert_technician(&self, technician: &Technician) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        state.technicians.insert(technician.id(), technician.clone());
        Ok(())
    }

    async fn update_technician(&self, technician: &Technician) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .technicians
            .get_mut(&technician.id())
            .ok_or(CatalogRepositoryError::TechnicianNotFound(technician.id()))?;
        *stored = technician.clone();
        Ok(())
    }

    async fn find_technician(
        &self,
        id: TechnicianId,
    ) -> CatalogRepositoryResult<Option<Technician>> {
        Ok(self.read()?.technicians.get(&id).cloned())
    }

    async fn find_technicians_by_name(
        &self,
        name: &CatalogName,
    ) -> CatalogRepositoryResult<Vec<Technician>> {
        let state = self.read()?;
        Ok(state
            .technicians
            .values()
            .filter(|technician| technician.name() == name)
            .cloned()
            .collect())
    }

    async fn list_technicians(&self, listing: Listing) -> CatalogRepositoryResult<Vec<Technician>> {
        let state = self.read()?;
        let mut technicians: Vec<Technician> = state
            .technicians
            .values()
            .filter(|technician| listing.admits(technician.status()))
            .cloned()
            .collect();
        technicians.sort_by(|a, b| {
            a.status()
                .rank()
                .cmp(&b.status().rank())
                .then_with(|| a.name().cmp(b.name()))
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(technicians)
    }

    async fn insert_component(&self, component: &Component) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        state.components.insert(component.id(), component.clone());
        Ok(())
    }

    async fn update_component(&self, component: &Component) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .components
            .get_mut(&component.id())
            .ok_or(CatalogRepositoryError::ComponentNotFound(component.id()))?;
        *stored = component.clone();
        Ok(())
    }

    async fn find_component(&self, id: ComponentId) -> CatalogRepositoryResult<Option<Component>> {
        Ok(self.read()?.components.get(&id).cloned())
    }

    async fn list_components(
        &self,
        section_code: &SectionCode,
        listing: Listing,
    ) -> CatalogRepositoryResult<Vec<Component>> {
        let state = self.read()?;
        let mut components: Vec<Component> = state
            .components
            .values()
            .filter(|component| component.section_code() == section_code)
            .filter(|component| listing.admits(component.status()))
            .cloned()
            .collect();
        components.sort_by(|a, b| {
            a.status()
                .rank()
                .cmp(&b.status().rank())
                .then_with(|| a.name().cmp(b.name()))
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(components)
    }
}
