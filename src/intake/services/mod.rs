//! Application services for intake submission and review.

mod intake;

pub use intake::{
    HelpRequest, IntakeService, IntakeServiceError, IntakeServiceResult, SparePartRequest,
};
