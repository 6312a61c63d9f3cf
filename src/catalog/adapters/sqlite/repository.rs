//! SQLite repository implementation for the catalog.

use super::models::{ComponentRow, SectionRow, TechnicianRow};
use crate::catalog::{
    domain::{
        CatalogName, CatalogStatus, Component, ComponentId, Listing, PersistedComponentData,
        PersistedSectionData, PersistedTechnicianData, Section, SectionCode, SectionId, Technician,
        TechnicianId,
    },
    ports::{CatalogRepository, CatalogRepositoryError, CatalogRepositoryResult},
};
use crate::storage::{
    SqlitePool,
    schema::{components, sections, technicians},
};
use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

/// Sort expression placing active entries before retired ones.
const ACTIVE_FIRST: &str = "CASE status WHEN 'active' THEN 0 ELSE 1 END";

/// SQLite-backed catalog repository.
#[derive(Debug, Clone)]
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    /// Creates a new repository from a SQLite connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CatalogRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> CatalogRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CatalogRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CatalogRepositoryError::persistence)?
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn insert_section_if_absent(&self, section: &Section) -> CatalogRepositoryResult<bool> {
        let row = section_to_row(section);
        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(sections::table)
                .values(&row)
                .on_conflict(sections::code)
                .do_nothing()
                .execute(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            Ok(inserted == 1)
        })
        .await
    }

    async fn update_section(&self, section: &Section) -> CatalogRepositoryResult<()> {
        let section_id = section.id();
        let name = section.name().as_str().to_owned();
        let description = section.description().to_owned();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                sections::table.filter(sections::id.eq(section_id.to_string())),
            )
            .set((sections::name.eq(&name), sections::description.eq(&description)))
            .execute(connection)
            .map_err(CatalogRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CatalogRepositoryError::SectionNotFound(section_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_section(&self, id: SectionId) -> CatalogRepositoryResult<Option<Section>> {
        self.run_blocking(move |connection| {
            let row = sections::table
                .filter(sections::id.eq(id.to_string()))
                .select(SectionRow::as_select())
                .first::<SectionRow>(connection)
                .optional()
                .map_err(CatalogRepositoryError::persistence)?;
            row.map(row_to_section).transpose()
        })
        .await
    }

    async fn find_section_by_code(
        &self,
        code: &SectionCode,
    ) -> CatalogRepositoryResult<Option<Section>> {
        let wanted = code.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = sections::table
                .filter(sections::code.eq(&wanted))
                .select(SectionRow::as_select())
                .first::<SectionRow>(connection)
                .optional()
                .map_err(CatalogRepositoryError::persistence)?;
            row.map(row_to_section).transpose()
        })
        .await
    }

    async fn list_sections(&self) -> CatalogRepositoryResult<Vec<Section>> {
        self.run_blocking(move |connection| {
            let rows = sections::table
                .order((sections::name.asc(), sections::id.asc()))
                .select(SectionRow::as_select())
                .load::<SectionRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_section).collect()
        })
        .await
    }

    async fn insert_technician(&self, technician: &Technician) -> CatalogRepositoryResult<()> {
        let row = technician_to_row(technician);
        self.run_blocking(move |connection| {
            diesel::insert_into(technicians::table)
                .values(&row)
                .execute(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update_technician(&self, technician: &Technician) -> CatalogRepositoryResult<()> {
        let technician_id = technician.id();
        let status = technician.status().as_str();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                technicians::table.filter(technicians::id.eq(technician_id.to_string())),
            )
            .set(technicians::status.eq(status))
            .execute(connection)
            .map_err(CatalogRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CatalogRepositoryError::TechnicianNotFound(technician_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_technician(
        &self,
        id: TechnicianId,
    ) -> CatalogRepositoryResult<Option<Technician>> {
        self.run_blocking(move |connection| {
            let row = technicians::table
                .filter(technicians::id.eq(id.to_string()))
                .select(TechnicianRow::as_select())
                .first::<TechnicianRow>(connection)
                .optional()
                .map_err(CatalogRepositoryError::persistence)?;
            row.map(row_to_technician).transpose()
        })
        .await
    }

    async fn find_technicians_by_name(
        &self,
        name: &CatalogName,
    ) -> CatalogRepositoryResult<Vec<Technician>> {
        let wanted = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = technicians::table
                .filter(technicians::name.eq(&wanted))
                .select(TechnicianRow::as_select())
                .load::<TechnicianRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_technician).collect()
        })
        .await
    }

    async fn list_technicians(&self, listing: Listing) -> CatalogRepositoryResult<Vec<Technician>> {
        self.run_blocking(move |connection| {
            let mut query = technicians::table
                .select(TechnicianRow::as_select())
                .order((
                    sql::<Integer>(ACTIVE_FIRST).asc(),
                    technicians::name.asc(),
                    technicians::id.asc(),
                ))
                .into_boxed();
            if listing == Listing::Selectable {
                query = query.filter(technicians::status.eq(CatalogStatus::Active.as_str()));
            }
            let rows = query
                .load::<TechnicianRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_technician).collect()
        })
        .await
    }

    async fn insert_component(&self, component: &Component) -> CatalogRepositoryResult<()> {
        let row = component_to_row(component);
        self.run_blocking(move |connection| {
            diesel::insert_into(components::table)
                .values(&row)
                .execute(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update_component(&self, component: &Component) -> CatalogRepositoryResult<()> {
        let component_id = component.id();
        let status = component.status().as_str();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                components::table.filter(components::id.eq(component_id.to_string())),
            )
            .set(components::status.eq(status))
            .execute(connection)
            .map_err(CatalogRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CatalogRepositoryError::ComponentNotFound(component_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_component(&self, id: ComponentId) -> CatalogRepositoryResult<Option<Component>> {
        self.run_blocking(move |connection| {
            let row = components::table
                .filter(components::id.eq(id.to_string()))
                .select(ComponentRow::as_select())
                .first::<ComponentRow>(connection)
                .optional()
                .map_err(CatalogRepositoryError::persistence)?;
            row.map(row_to_component).transpose()
        })
        .await
    }

    async fn list_components(
        &self,
        section_code: &SectionCode,
        listing: Listing,
    ) -> CatalogRepositoryResult<Vec<Component>> {
        let code = section_code.as_str().to_owned();
        self.run_blocking(move |connection| {
            let mut query = components::table
                .filter(components::section_code.eq(code))
                .select(ComponentRow::as_select())
                .order((
                    sql::<Integer>(ACTIVE_FIRST).asc(),
                    components::name.asc(),
                    components::id.asc(),
                ))
                .into_boxed();
            if listing == Listing::Selectable {
                query = query.filter(components::status.eq(CatalogStatus::Active.as_str()));
            }
            let rows = query
                .load::<ComponentRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_component).collect()
        })
        .await
    }
}

fn section_to_row(section: &Section) -> SectionRow {
    SectionRow {
        id: section.id().to_string(),
        code: section.code().as_str().to_owned(),
        name: section.name().as_str().to_owned(),
        description: section.description().to_owned(),
    }
}

fn technician_to_row(technician: &Technician) -> TechnicianRow {
    TechnicianRow {
        id: technician.id().to_string(),
        name: technician.name().as_str().to_owned(),
        role: technician.role().map(str::to_owned),
        status: technician.status().as_str().to_owned(),
    }
}

fn component_to_row(component: &Component) -> ComponentRow {
    ComponentRow {
        id: component.id().to_string(),
        section_code: component.section_code().as_str().to_owned(),
        name: component.name().as_str().to_owned(),
        status: component.status().as_str().to_owned(),
    }
}

fn parse_uuid(raw: &str) -> CatalogRepositoryResult<Uuid> {
    Uuid::parse_str(raw).map_err(CatalogRepositoryError::invalid_persisted_data)
}

fn row_to_section(row: SectionRow) -> CatalogRepositoryResult<Section> {
    let SectionRow {
        id,
        code,
        name,
        description,
    } = row;
    Ok(Section::from_persisted(PersistedSectionData {
        id: SectionId::from_uuid(parse_uuid(&id)?),
        code: SectionCode::new(code).map_err(CatalogRepositoryError::invalid_persisted_data)?,
        name: CatalogName::new(name).map_err(CatalogRepositoryError::invalid_persisted_data)?,
        description,
    }))
}

fn row_to_technician(row: TechnicianRow) -> CatalogRepositoryResult<Technician> {
    let TechnicianRow {
        id,
        name,
        role,
        status,
    } = row;
    Ok(Technician::from_persisted(PersistedTechnicianData {
        id: TechnicianId::from_uuid(parse_uuid(&id)?),
        name: CatalogName::new(name).map_err(CatalogRepositoryError::invalid_persisted_data)?,
        role,
        status: CatalogStatus::try_from(status.as_str())
            .map_err(CatalogRepositoryError::invalid_persisted_data)?,
    }))
}

fn row_to_component(row: ComponentRow) -> CatalogRepositoryResult<Component> {
    let ComponentRow {
        id,
        section_code,
        name,
        status,
    } = row;
    Ok(Component::from_persisted(PersistedComponentData {
        id: ComponentId::from_uuid(parse_uuid(&id)?),
        section_code: SectionCode::new(section_code)
            .map_err(CatalogRepositoryError::invalid_persisted_data)?,
        name: CatalogName::new(name).map_err(CatalogRepositoryError::invalid_persisted_data)?,
        status: CatalogStatus::try_from(status.as_str())
            .map_err(CatalogRepositoryError::invalid_persisted_data)?,
    }))
}
