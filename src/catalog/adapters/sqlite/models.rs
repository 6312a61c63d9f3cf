//! Diesel row models for catalog persistence.

use crate::storage::schema::{components, sections, technicians};
use diesel::prelude::*;

/// Row shape shared by section queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sections)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SectionRow {
    /// Section identifier.
    pub id: String,
    /// External code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Row shape shared by technician queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = technicians)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TechnicianRow {
    /// Technician identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional role label.
    pub role: Option<String>,
    /// Membership status.
    pub status: String,
}

/// Row shape shared by component queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = components)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ComponentRow {
    /// Component identifier.
    pub id: String,
    /// Owning section code.
    pub section_code: String,
    /// Display name.
    pub name: String,
    /// Membership status.
    pub status: String,
}
