//! Catalog of line sections, technicians, and section components.
//!
//! Sections are registered idempotently by their external code and are
//! never deleted. Technicians and components are retired rather than
//! removed so historical records keep resolving. Listings expose both a
//! selectable (active only) and a historical (everything) mode. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
