//! SQLite repository implementation for intake requests.

use super::models::IntakeRow;
use crate::attachment::domain::StoredFile;
use crate::catalog::domain::{SectionId, TechnicianId};
use crate::intake::{
    domain::{IntakeId, IntakeKind, IntakeRequest, PersistedIntakeData, Requester},
    ports::{IntakeRepository, IntakeRepositoryError, IntakeRepositoryResult},
};
use crate::stamp::MinuteStamp;
use crate::storage::{SqlitePool, schema::intake_requests};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use thiserror::Error;
use uuid::Uuid;

/// SQLite-backed intake repository.
#[derive(Debug, Clone)]
pub struct SqliteIntakeRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
enum IntakeRowError {
    #[error("help request {0} has no requester name")]
    MissingRequesterName(String),
    #[error("request {0} has a partial photo")]
    PartialPhoto(String),
}

impl SqliteIntakeRepository {
    /// Creates a new repository from a SQLite connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IntakeRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> IntakeRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IntakeRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IntakeRepositoryError::persistence)?
    }
}

#[async_trait]
impl IntakeRepository for SqliteIntakeRepository {
    async fn insert(&self, request: &IntakeRequest) -> IntakeRepositoryResult<()> {
        let id = request.id();
        let row = request_to_row(request);
        self.run_blocking(move |connection| {
            diesel::insert_into(intake_requests::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IntakeRepositoryError::Duplicate(id)
                    }
                    other => IntakeRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: IntakeId) -> IntakeRepositoryResult<Option<IntakeRequest>> {
        self.run_blocking(move |connection| {
            let row = intake_requests::table
                .filter(intake_requests::id.eq(id.to_string()))
                .select(IntakeRow::as_select())
                .first::<IntakeRow>(connection)
                .optional()
                .map_err(IntakeRepositoryError::persistence)?;
            row.map(row_to_request).transpose()
        })
        .await
    }

    async fn list_by_kind(
        &self,
        kind: IntakeKind,
        limit: usize,
    ) -> IntakeRepositoryResult<Vec<IntakeRequest>> {
        let bound = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            let rows = intake_requests::table
                .filter(intake_requests::kind.eq(kind.as_str()))
                .order((intake_requests::created_at.desc(), intake_requests::id.desc()))
                .limit(bound)
                .select(IntakeRow::as_select())
                .load::<IntakeRow>(connection)
                .map_err(IntakeRepositoryError::persistence)?;
            rows.into_iter().map(row_to_request).collect()
        })
        .await
    }
}

fn request_to_row(request: &IntakeRequest) -> IntakeRow {
    let (technician_id, requester_name, requester_contact) = match request.requester() {
        Requester::Technician { technician_id } => (technician_id.map(|id| id.to_string()), None, None),
        Requester::Contact { name, contact } => (None, Some(name.clone()), contact.clone()),
    };
    let photo = request.photo();
    IntakeRow {
        id: request.id().to_string(),
        kind: request.kind().as_str().to_owned(),
        section_id: request.section_id().map(|id| id.to_string()),
        technician_id,
        requester_name,
        requester_contact,
        description: request.description().to_owned(),
        photo_filename: photo.map(|file| file.filename.clone()),
        photo_mime_type: photo.and_then(|file| file.mime_type.clone()),
        photo_path: photo.map(|file| file.storage_path.clone()),
        photo_digest: photo.map(|file| file.content_digest.clone()),
        status: request.status().to_owned(),
        created_at: request.created_at().to_storage(),
    }
}

fn parse_uuid(raw: &str) -> IntakeRepositoryResult<Uuid> {
    Uuid::parse_str(raw).map_err(IntakeRepositoryError::invalid_persisted_data)
}

fn row_to_request(row: IntakeRow) -> IntakeRepositoryResult<IntakeRequest> {
    let IntakeRow {
        id,
        kind,
        section_id,
        technician_id,
        requester_name,
        requester_contact,
        description,
        photo_filename,
        photo_mime_type,
        photo_path,
        photo_digest,
        status,
        created_at,
    } = row;

    let requester = match IntakeKind::try_from(kind.as_str())
        .map_err(IntakeRepositoryError::invalid_persisted_data)?
    {
        IntakeKind::SparePart => Requester::Technician {
            technician_id: technician_id
                .as_deref()
                .map(parse_uuid)
                .transpose()?
                .map(TechnicianId::from_uuid),
        },
        IntakeKind::Help => Requester::Contact {
            name: requester_name.ok_or_else(|| {
                IntakeRepositoryError::invalid_persisted_data(
                    IntakeRowError::MissingRequesterName(id.clone()),
                )
            })?,
            contact: requester_contact,
        },
    };

    let photo = match (photo_filename, photo_path, photo_digest) {
        (Some(filename), Some(storage_path), Some(content_digest)) => Some(StoredFile {
            filename,
            mime_type: photo_mime_type,
            storage_path,
            content_digest,
        }),
        (None, None, None) => None,
        _ => {
            return Err(IntakeRepositoryError::invalid_persisted_data(
                IntakeRowError::PartialPhoto(id),
            ));
        }
    };

    Ok(IntakeRequest::from_persisted(PersistedIntakeData {
        id: IntakeId::from_uuid(parse_uuid(&id)?),
        section_id: section_id
            .as_deref()
            .map(parse_uuid)
            .transpose()?
            .map(SectionId::from_uuid),
        requester,
        description,
        photo,
        status,
        created_at: MinuteStamp::parse(&created_at)
            .map_err(IntakeRepositoryError::invalid_persisted_data)?,
    }))
}
