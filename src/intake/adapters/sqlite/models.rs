//! Diesel row model for intake persistence.

use crate::storage::schema::intake_requests;
use diesel::prelude::*;

/// Row shape shared by intake queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = intake_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IntakeRow {
    pub id: String,
    pub kind: String,
    pub section_id: Option<String>,
    pub technician_id: Option<String>,
    pub requester_name: Option<String>,
    pub requester_contact: Option<String>,
    pub description: String,
    pub photo_filename: Option<String>,
    pub photo_mime_type: Option<String>,
    pub photo_path: Option<String>,
    pub photo_digest: Option<String>,
    pub status: String,
    pub created_at: String,
}
