//! Maintlog: maintenance records for production line sections.
//!
//! The crate records work performed on the sections of an industrial line,
//! keeps photo and document evidence next to each record, and tracks fault
//! reports until a technician resolves them. Sections carry a scannable
//! code that the provisioning tool prints onto the machine.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and blob storage
//! - **Adapters**: In-memory, SQLite, and directory-backed implementations
//! - **Services**: Orchestration over the ports
//!
//! # Modules
//!
//! - [`catalog`]: Sections, technicians, and components
//! - [`attachment`]: Collision-free evidence file storage
//! - [`ledger`]: Work records, reporting queries, and fault resolution
//! - [`intake`]: Spare-part requests and help reports
//! - [`provisioning`]: Section listing and scan-target rendering
//! - [`storage`]: Connection pool and embedded migrations
//! - [`app`]: Composition root used by the `maintlog` binary

pub mod app;
pub mod attachment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod intake;
pub mod ledger;
pub mod provisioning;
pub mod stamp;
pub mod storage;
pub mod telemetry;
pub(crate) mod text;

#[cfg(test)]
pub(crate) mod test_support;
