//! Domain model for intake requests.

mod error;
mod request;

pub use error::{IntakeDomainError, ParseIntakeKindError};
pub use request::{
    INITIAL_STATUS, IntakeId, IntakeKind, IntakeRequest, PersistedIntakeData, Requester,
};
