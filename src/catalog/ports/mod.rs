//! Port contracts for the catalog.
//!
//! Ports define infrastructure-agnostic interfaces used by catalog services.

pub mod repository;

pub use repository::{CatalogRepository, CatalogRepositoryError, CatalogRepositoryResult};
