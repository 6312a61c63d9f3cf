//! SQLite repository implementation for work orders.

use super::models::{AttachmentRow, WorkOrderRow};
use crate::attachment::domain::StoredFile;
use crate::catalog::domain::{SectionId, TechnicianId};
use crate::ledger::{
    domain::{
        Attachment, AttachmentId, DateWindow, FAULT_REPORT, FaultFilter, Narrative,
        PersistedAttachmentData, PersistedWorkOrderData, Resolution, WorkDetails, WorkOrder,
        WorkOrderId, WorkType,
    },
    ports::{WorkOrderRepository, WorkOrderRepositoryError, WorkOrderRepositoryResult},
};
use crate::stamp::MinuteStamp;
use crate::storage::{
    SqlitePool,
    schema::{attachments, work_orders},
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use thiserror::Error;
use uuid::Uuid;

/// SQLite-backed work order repository.
#[derive(Debug, Clone)]
pub struct SqliteWorkOrderRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[error("work order {0} has inconsistent resolution columns")]
struct InconsistentResolution(String);

impl From<diesel::result::Error> for WorkOrderRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

type BoxedWorkOrderQuery<'a> = work_orders::BoxedQuery<'a, Sqlite>;

impl SqliteWorkOrderRepository {
    /// Creates a new repository from a SQLite connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkOrderRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> WorkOrderRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkOrderRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkOrderRepositoryError::persistence)?
    }

    async fn load_newest_first(
        &self,
        query: BoxedWorkOrderQuery<'static>,
        limit: Option<usize>,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let bounded = match limit {
            Some(max) => query.limit(i64::try_from(max).unwrap_or(i64::MAX)),
            None => query,
        };
        self.run_blocking(move |connection| {
            let rows = bounded
                .order((
                    work_orders::date.desc(),
                    work_orders::created_at.desc(),
                    work_orders::id.desc(),
                ))
                .select(WorkOrderRow::as_select())
                .load::<WorkOrderRow>(connection)?;
            rows.into_iter().map(row_to_work_order).collect()
        })
        .await
    }
}

#[async_trait]
impl WorkOrderRepository for SqliteWorkOrderRepository {
    async fn insert(
        &self,
        work_order: &WorkOrder,
        attachments: &[Attachment],
    ) -> WorkOrderRepositoryResult<()> {
        let work_order_id = work_order.id();
        let row = work_order_to_row(work_order)?;
        let attachment_rows: Vec<AttachmentRow> =
            attachments.iter().map(attachment_to_row).collect();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|tx| {
                diesel::insert_into(work_orders::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        diesel::result::Error::DatabaseError(
                            diesel::result::DatabaseErrorKind::UniqueViolation,
                            _,
                        ) => WorkOrderRepositoryError::DuplicateWorkOrder(work_order_id),
                        other => WorkOrderRepositoryError::persistence(other),
                    })?;
                insert_attachment_rows(tx, &attachment_rows)
            })
        })
        .await
    }

    async fn resolve(
        &self,
        work_order: &WorkOrder,
        attachments: &[Attachment],
    ) -> WorkOrderRepositoryResult<()> {
        let work_order_id = work_order.id();
        let id = work_order_id.to_string();
        let description = work_order
            .resolution()
            .description()
            .map(|text| text.as_str().to_owned());
        let resolved_at = work_order.resolution().resolved_at().map(MinuteStamp::to_storage);
        let attachment_rows: Vec<AttachmentRow> =
            attachments.iter().map(attachment_to_row).collect();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|tx| {
                let updated = diesel::update(
                    work_orders::table
                        .filter(work_orders::id.eq(&id))
                        .filter(work_orders::resolved.eq(false)),
                )
                .set((
                    work_orders::resolved.eq(true),
                    work_orders::resolution_description.eq(description),
                    work_orders::resolved_at.eq(resolved_at),
                ))
                .execute(tx)?;
                if updated == 0 {
                    let known = diesel::select(exists(
                        work_orders::table.filter(work_orders::id.eq(&id)),
                    ))
                    .get_result::<bool>(tx)?;
                    return Err(if known {
                        WorkOrderRepositoryError::AlreadyResolved(work_order_id)
                    } else {
                        WorkOrderRepositoryError::NotFound(work_order_id)
                    });
                }
                insert_attachment_rows(tx, &attachment_rows)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: WorkOrderId) -> WorkOrderRepositoryResult<Option<WorkOrder>> {
        self.run_blocking(move |connection| {
            let row = work_orders::table
                .filter(work_orders::id.eq(id.to_string()))
                .select(WorkOrderRow::as_select())
                .first::<WorkOrderRow>(connection)
                .optional()?;
            row.map(row_to_work_order).transpose()
        })
        .await
    }

    async fn list_for_section(
        &self,
        section_id: SectionId,
        limit: usize,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let query = work_orders::table
            .filter(work_orders::section_id.eq(section_id.to_string()))
            .into_boxed();
        self.load_newest_first(query, Some(limit)).await
    }

    async fn list_for_technician(
        &self,
        technician_id: TechnicianId,
        limit: usize,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let query = work_orders::table
            .filter(work_orders::technician_id.eq(technician_id.to_string()))
            .into_boxed();
        self.load_newest_first(query, Some(limit)).await
    }

    async fn list_in_range(
        &self,
        window: &DateWindow,
        section_id: Option<SectionId>,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let mut query = work_orders::table
            .filter(work_orders::date.ge(window.lower_bound()))
            .filter(work_orders::date.le(window.upper_bound()))
            .into_boxed();
        if let Some(wanted) = section_id {
            query = query.filter(work_orders::section_id.eq(wanted.to_string()));
        }
        self.load_newest_first(query, None).await
    }

    async fn list_fault_reports(
        &self,
        filter: FaultFilter,
        limit: Option<usize>,
    ) -> WorkOrderRepositoryResult<Vec<WorkOrder>> {
        let query = work_orders::table
            .filter(work_orders::work_type.eq(FAULT_REPORT))
            .filter(work_orders::resolved.eq(filter.resolved_flag()))
            .into_boxed();
        self.load_newest_first(query, limit).await
    }

    async fn list_attachments(
        &self,
        work_order_id: WorkOrderId,
    ) -> WorkOrderRepositoryResult<Vec<Attachment>> {
        self.run_blocking(move |connection| {
            let rows = attachments::table
                .filter(attachments::work_order_id.eq(work_order_id.to_string()))
                .order((attachments::created_at.asc(), attachments::filename.asc()))
                .select(AttachmentRow::as_select())
                .load::<AttachmentRow>(connection)?;
            rows.into_iter().map(row_to_attachment).collect()
        })
        .await
    }
}

fn insert_attachment_rows(
    connection: &mut SqliteConnection,
    rows: &[AttachmentRow],
) -> WorkOrderRepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(attachments::table)
        .values(rows)
        .execute(connection)?;
    Ok(())
}

fn work_order_to_row(work_order: &WorkOrder) -> WorkOrderRepositoryResult<WorkOrderRow> {
    let resolution = work_order.resolution();
    Ok(WorkOrderRow {
        id: work_order.id().to_string(),
        section_id: work_order.section_id().to_string(),
        technician_id: work_order.technician_id().map(|id| id.to_string()),
        date: work_order.date().to_storage(),
        work_type: work_order.work_type().as_str().to_owned(),
        failure_type: work_order.failure_type().map(str::to_owned),
        component: work_order.component().map(str::to_owned),
        description: work_order.description().as_str().to_owned(),
        downtime_minutes: i32::try_from(work_order.downtime_minutes())
            .map_err(WorkOrderRepositoryError::invalid_persisted_data)?,
        machine_stopped: work_order.machine_stopped(),
        created_at: work_order.created_at().to_storage(),
        resolved: resolution.is_resolved(),
        resolution_description: resolution.description().map(|text| text.as_str().to_owned()),
        resolved_at: resolution.resolved_at().map(MinuteStamp::to_storage),
    })
}

fn attachment_to_row(attachment: &Attachment) -> AttachmentRow {
    let file = attachment.file();
    AttachmentRow {
        id: attachment.id().to_string(),
        work_order_id: attachment.work_order_id().to_string(),
        filename: file.filename.clone(),
        mime_type: file.mime_type.clone(),
        storage_path: file.storage_path.clone(),
        content_digest: file.content_digest.clone(),
        created_at: attachment.created_at().to_storage(),
    }
}

fn parse_uuid(raw: &str) -> WorkOrderRepositoryResult<Uuid> {
    Uuid::parse_str(raw).map_err(WorkOrderRepositoryError::invalid_persisted_data)
}

fn parse_stamp(raw: &str) -> WorkOrderRepositoryResult<MinuteStamp> {
    MinuteStamp::parse(raw).map_err(WorkOrderRepositoryError::invalid_persisted_data)
}

fn row_to_resolution(
    id: &str,
    resolved: bool,
    description: Option<String>,
    resolved_at: Option<String>,
) -> WorkOrderRepositoryResult<Resolution> {
    match (resolved, description, resolved_at) {
        (false, None, None) => Ok(Resolution::Pending),
        (true, None, None) => Ok(Resolution::ClosedOnEntry),
        (true, Some(text), Some(stamp)) => Ok(Resolution::Resolved {
            description: Narrative::new("resolution", text)
                .map_err(WorkOrderRepositoryError::invalid_persisted_data)?,
            resolved_at: parse_stamp(&stamp)?,
        }),
        _ => Err(WorkOrderRepositoryError::invalid_persisted_data(
            InconsistentResolution(id.to_owned()),
        )),
    }
}

fn row_to_work_order(row: WorkOrderRow) -> WorkOrderRepositoryResult<WorkOrder> {
    let WorkOrderRow {
        id,
        section_id,
        technician_id,
        date,
        work_type,
        failure_type,
        component,
        description,
        downtime_minutes,
        machine_stopped,
        created_at,
        resolved,
        resolution_description,
        resolved_at,
    } = row;
    let resolution = row_to_resolution(&id, resolved, resolution_description, resolved_at)?;
    let details = WorkDetails {
        technician_id: technician_id
            .as_deref()
            .map(parse_uuid)
            .transpose()?
            .map(TechnicianId::from_uuid),
        work_type: WorkType::new(work_type)
            .map_err(WorkOrderRepositoryError::invalid_persisted_data)?,
        failure_type,
        component,
        description: Narrative::new("description", description)
            .map_err(WorkOrderRepositoryError::invalid_persisted_data)?,
        downtime_minutes: u32::try_from(downtime_minutes)
            .map_err(WorkOrderRepositoryError::invalid_persisted_data)?,
        machine_stopped,
    };
    Ok(WorkOrder::from_persisted(PersistedWorkOrderData {
        id: WorkOrderId::from_uuid(parse_uuid(&id)?),
        section_id: SectionId::from_uuid(parse_uuid(&section_id)?),
        details,
        date: parse_stamp(&date)?,
        created_at: parse_stamp(&created_at)?,
        resolution,
    }))
}

fn row_to_attachment(row: AttachmentRow) -> WorkOrderRepositoryResult<Attachment> {
    let AttachmentRow {
        id,
        work_order_id,
        filename,
        mime_type,
        storage_path,
        content_digest,
        created_at,
    } = row;
    Ok(Attachment::from_persisted(PersistedAttachmentData {
        id: AttachmentId::from_uuid(parse_uuid(&id)?),
        work_order_id: WorkOrderId::from_uuid(parse_uuid(&work_order_id)?),
        file: StoredFile {
            filename,
            mime_type,
            storage_path,
            content_digest,
        },
        created_at: parse_stamp(&created_at)?,
    }))
}
