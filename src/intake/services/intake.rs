//! Service layer for spare-part requests and help reports.

use crate::attachment::{
    domain::{StoredFile, UploadedFile},
    ports::BlobStore,
    services::{AttachmentError, AttachmentStore},
};
use crate::catalog::{
    domain::{SectionId, TechnicianId},
    ports::{CatalogRepository, CatalogRepositoryError},
    services::section_by_raw_code,
};
use crate::error::ErrorKind;
use crate::intake::{
    domain::{IntakeDomainError, IntakeId, IntakeKind, IntakeRequest, Requester},
    ports::{IntakeRepository, IntakeRepositoryError},
};
use crate::text::non_blank;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for [`IntakeService::submit_spare_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparePartRequest {
    section_code: Option<String>,
    technician_id: Option<TechnicianId>,
    description: String,
    photo: Option<UploadedFile>,
}

impl SparePartRequest {
    /// Creates a request describing the parts needed.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            section_code: None,
            technician_id: None,
            description: description.into(),
            photo: None,
        }
    }

    /// Names the section the parts are for. Blank codes are ignored.
    #[must_use]
    pub fn with_section(mut self, code: impl Into<String>) -> Self {
        self.section_code = non_blank(code.into());
        self
    }

    /// Names the requesting technician.
    #[must_use]
    pub const fn with_technician(mut self, technician_id: TechnicianId) -> Self {
        self.technician_id = Some(technician_id);
        self
    }

    /// Attaches a photo.
    #[must_use]
    pub fn with_photo(mut self, photo: UploadedFile) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// Request payload for [`IntakeService::submit_help_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    section_code: Option<String>,
    name: String,
    contact: Option<String>,
    description: String,
    photo: Option<UploadedFile>,
}

impl HelpRequest {
    /// Creates a help report from a named requester.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            section_code: None,
            name: name.into(),
            contact: None,
            description: description.into(),
            photo: None,
        }
    }

    /// Names the section concerned. Blank codes are ignored.
    #[must_use]
    pub fn with_section(mut self, code: impl Into<String>) -> Self {
        self.section_code = non_blank(code.into());
        self
    }

    /// Sets how to reach the requester.
    #[must_use]
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = non_blank(contact.into());
        self
    }

    /// Attaches a photo.
    #[must_use]
    pub fn with_photo(mut self, photo: UploadedFile) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// Service-level errors for intake operations.
#[derive(Debug, Error)]
pub enum IntakeServiceError {
    /// Input was rejected by the domain.
    #[error(transparent)]
    Domain(#[from] IntakeDomainError),
    /// No section has the code.
    #[error("section code not found: {0}")]
    UnknownSection(String),
    /// No technician has the id.
    #[error("technician not found: {0}")]
    UnknownTechnician(TechnicianId),
    /// The photo could not be stored.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    /// Intake persistence failed.
    #[error(transparent)]
    Repository(#[from] IntakeRepositoryError),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
}

impl IntakeServiceError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::ValidationFailure,
            Self::UnknownSection(_) | Self::UnknownTechnician(_) => ErrorKind::NotFound,
            Self::Attachment(err) => err.kind(),
            Self::Repository(_) | Self::Catalog(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for intake service operations.
pub type IntakeServiceResult<T> = Result<T, IntakeServiceError>;

/// Intake orchestration service.
#[derive(Clone)]
pub struct IntakeService<R, K, B, C>
where
    R: IntakeRepository,
    K: CatalogRepository,
    B: BlobStore + 'static,
    C: Clock + Send + Sync,
{
    requests: Arc<R>,
    catalog: Arc<K>,
    attachments: AttachmentStore<B>,
    clock: Arc<C>,
}

impl<R, K, B, C> IntakeService<R, K, B, C>
where
    R: IntakeRepository,
    K: CatalogRepository,
    B: BlobStore + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new intake service.
    #[must_use]
    pub const fn new(
        requests: Arc<R>,
        catalog: Arc<K>,
        attachments: AttachmentStore<B>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            requests,
            catalog,
            attachments,
            clock,
        }
    }

    /// Files a spare-part request.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeServiceError::UnknownSection`] or
    /// [`IntakeServiceError::UnknownTechnician`] for dangling references,
    /// [`IntakeServiceError::Domain`] for a blank description, and
    /// [`IntakeServiceError::Attachment`] or
    /// [`IntakeServiceError::Repository`] when storage fails.
    pub async fn submit_spare_request(
        &self,
        request: SparePartRequest,
    ) -> IntakeServiceResult<IntakeRequest> {
        let SparePartRequest {
            section_code,
            technician_id,
            description,
            photo,
        } = request;
        if let Some(id) = technician_id {
            if self.catalog.find_technician(id).await?.is_none() {
                return Err(IntakeServiceError::UnknownTechnician(id));
            }
        }
        self.submit(
            section_code.as_deref(),
            Requester::Technician { technician_id },
            &description,
            photo,
        )
        .await
    }

    /// Files a help report.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeServiceError::UnknownSection`] for an unknown section,
    /// [`IntakeServiceError::Domain`] for a blank name or description, and
    /// [`IntakeServiceError::Attachment`] or
    /// [`IntakeServiceError::Repository`] when storage fails.
    pub async fn submit_help_request(
        &self,
        request: HelpRequest,
    ) -> IntakeServiceResult<IntakeRequest> {
        let HelpRequest {
            section_code,
            name,
            contact,
            description,
            photo,
        } = request;
        self.submit(
            section_code.as_deref(),
            Requester::Contact { name, contact },
            &description,
            photo,
        )
        .await
    }

    /// Finds a request by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeServiceError::Repository`] when lookup fails.
    pub async fn find_intake(&self, id: IntakeId) -> IntakeServiceResult<Option<IntakeRequest>> {
        Ok(self.requests.find_by_id(id).await?)
    }

    /// Returns the newest requests of one kind.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeServiceError::Repository`] when lookup fails.
    pub async fn list_intake(
        &self,
        kind: IntakeKind,
        limit: usize,
    ) -> IntakeServiceResult<Vec<IntakeRequest>> {
        Ok(self.requests.list_by_kind(kind, limit).await?)
    }

    async fn submit(
        &self,
        section_code: Option<&str>,
        requester: Requester,
        description: &str,
        photo: Option<UploadedFile>,
    ) -> IntakeServiceResult<IntakeRequest> {
        let section_id = self.optional_section(section_code).await?;
        let draft = IntakeRequest::new(section_id, requester, description, &*self.clock)?;
        let request = match self.stage_photo(photo).await? {
            Some(file) => draft.with_photo(file),
            None => draft,
        };

        if let Err(err) = self.requests.insert(&request).await {
            if let Some(file) = request.photo() {
                warn!(filename = %file.filename, error = %err, "stored photo left without a request");
            }
            return Err(err.into());
        }
        info!(
            intake_id = %request.id(),
            kind = %request.kind(),
            photo = request.photo().is_some(),
            "filed intake request"
        );
        Ok(request)
    }

    async fn optional_section(&self, code: Option<&str>) -> IntakeServiceResult<Option<SectionId>> {
        let Some(raw) = code else {
            return Ok(None);
        };
        section_by_raw_code(self.catalog.as_ref(), raw)
            .await?
            .map(|section| Some(section.id()))
            .ok_or_else(|| IntakeServiceError::UnknownSection(raw.to_owned()))
    }

    async fn stage_photo(
        &self,
        photo: Option<UploadedFile>,
    ) -> IntakeServiceResult<Option<StoredFile>> {
        let Some(upload) = photo else {
            return Ok(None);
        };
        Ok(self.attachments.stage(vec![upload]).await?.pop())
    }
}
