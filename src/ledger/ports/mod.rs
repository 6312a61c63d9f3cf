//! Port contracts for record persistence.

mod repository;

pub use repository::{WorkOrderRepository, WorkOrderRepositoryError, WorkOrderRepositoryResult};
