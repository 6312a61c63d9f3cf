//! Intake request aggregate.

use super::{IntakeDomainError, ParseIntakeKindError};
use crate::attachment::domain::StoredFile;
use crate::catalog::domain::{SectionId, TechnicianId};
use crate::stamp::MinuteStamp;
use crate::text::non_blank;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Status every request starts with.
pub const INITIAL_STATUS: &str = "pending";

/// Unique identifier for an intake request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntakeId(Uuid);

impl IntakeId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for IntakeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intake variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeKind {
    /// Request for spare parts.
    SparePart,
    /// General help report.
    Help,
}

impl IntakeKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SparePart => "spare_part",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for IntakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IntakeKind {
    type Error = ParseIntakeKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "spare_part" => Ok(Self::SparePart),
            "help" => Ok(Self::Help),
            _ => Err(ParseIntakeKindError(value.to_owned())),
        }
    }
}

/// Who filed the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requester {
    /// A technician, possibly unnamed, asking for parts.
    Technician {
        /// The requesting technician.
        technician_id: Option<TechnicianId>,
    },
    /// Anyone asking for help.
    Contact {
        /// Name given by the requester.
        name: String,
        /// Phone, e-mail, or similar.
        contact: Option<String>,
    },
}

impl Requester {
    /// Returns the intake kind this requester files.
    #[must_use]
    pub const fn kind(&self) -> IntakeKind {
        match self {
            Self::Technician { .. } => IntakeKind::SparePart,
            Self::Contact { .. } => IntakeKind::Help,
        }
    }
}

/// A spare-part request or help report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRequest {
    id: IntakeId,
    section_id: Option<SectionId>,
    requester: Requester,
    description: String,
    photo: Option<StoredFile>,
    status: String,
    created_at: MinuteStamp,
}

/// Parameter object for reconstructing a persisted intake request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIntakeData {
    /// Persisted identifier.
    pub id: IntakeId,
    /// Persisted section reference.
    pub section_id: Option<SectionId>,
    /// Persisted requester.
    pub requester: Requester,
    /// Persisted narrative.
    pub description: String,
    /// Persisted photo.
    pub photo: Option<StoredFile>,
    /// Persisted status.
    pub status: String,
    /// Persisted creation stamp.
    pub created_at: MinuteStamp,
}

impl IntakeRequest {
    /// Creates a pending request stamped with the current minute.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeDomainError::EmptyText`] when the description or a
    /// contact name is blank.
    pub fn new(
        section_id: Option<SectionId>,
        requester: Requester,
        description: &str,
        clock: &impl Clock,
    ) -> Result<Self, IntakeDomainError> {
        let text = required("description", description)?;
        let checked = match requester {
            Requester::Contact { name, contact } => Requester::Contact {
                name: required("name", &name)?,
                contact: contact.and_then(non_blank),
            },
            technician @ Requester::Technician { .. } => technician,
        };
        Ok(Self {
            id: IntakeId::new(),
            section_id,
            requester: checked,
            description: text,
            photo: None,
            status: INITIAL_STATUS.to_owned(),
            created_at: MinuteStamp::now(clock),
        })
    }

    /// Attaches the stored photo.
    #[must_use]
    pub fn with_photo(mut self, photo: StoredFile) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Reconstructs a request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIntakeData) -> Self {
        Self {
            id: data.id,
            section_id: data.section_id,
            requester: data.requester,
            description: data.description,
            photo: data.photo,
            status: data.status,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> IntakeId {
        self.id
    }

    /// Returns the variant.
    #[must_use]
    pub const fn kind(&self) -> IntakeKind {
        self.requester.kind()
    }

    /// Returns the section, if one was named.
    #[must_use]
    pub const fn section_id(&self) -> Option<SectionId> {
        self.section_id
    }

    /// Returns who filed the request.
    #[must_use]
    pub const fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Returns the narrative.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the photo, if one was attached.
    #[must_use]
    pub const fn photo(&self) -> Option<&StoredFile> {
        self.photo.as_ref()
    }

    /// Returns the status string.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the creation stamp.
    #[must_use]
    pub const fn created_at(&self) -> MinuteStamp {
        self.created_at
    }
}

fn required(field: &'static str, value: &str) -> Result<String, IntakeDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeDomainError::EmptyText(field));
    }
    Ok(trimmed.to_owned())
}
