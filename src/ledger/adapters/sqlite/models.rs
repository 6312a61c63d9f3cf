//! Diesel row models for work order persistence.

use crate::storage::schema::{attachments, work_orders};
use diesel::prelude::*;

/// Row shape shared by work order queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = work_orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkOrderRow {
    pub id: String,
    pub section_id: String,
    pub technician_id: Option<String>,
    pub date: String,
    pub work_type: String,
    pub failure_type: Option<String>,
    pub component: Option<String>,
    pub description: String,
    pub downtime_minutes: i32,
    pub machine_stopped: bool,
    pub created_at: String,
    pub resolved: bool,
    pub resolution_description: Option<String>,
    pub resolved_at: Option<String>,
}

/// Row shape shared by attachment queries and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttachmentRow {
    pub id: String,
    pub work_order_id: String,
    pub filename: String,
    pub mime_type: Option<String>,
    pub storage_path: String,
    pub content_digest: String,
    pub created_at: String,
}
