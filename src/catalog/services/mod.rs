//! Application services for catalog maintenance.

mod catalog;
mod lookup;
mod seed;

pub use catalog::{CatalogService, CatalogServiceError, CatalogServiceResult};
pub(crate) use lookup::section_by_raw_code;
pub use seed::{SeedPlan, SeedReport, SeedSection, SeedTechnician};
