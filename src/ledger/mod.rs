//! Maintenance record ledger and fault resolution workflow.
//!
//! Records are filed against a section and never edited afterwards, apart
//! from the write-once resolution of fault reports. Only the literal type
//! `"fault report"` starts pending; all other work is closed on entry.
//! Evidence files are staged through [`crate::attachment`] and committed
//! together with the record. The module follows hexagonal architecture:
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
