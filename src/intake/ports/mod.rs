//! Port contracts for intake persistence.

mod repository;

pub use repository::{IntakeRepository, IntakeRepositoryError, IntakeRepositoryResult};
