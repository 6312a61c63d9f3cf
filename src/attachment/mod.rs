//! Evidence files stored in a shared, flat namespace.
//!
//! Uploaded payloads are written under their sanitized client name; when
//! that name is taken, `stem_1.ext`, `stem_2.ext`, ... are tried in turn.
//! Every attempt is a single exclusive create, so two concurrent uploads
//! can never claim the same stored name. The module follows hexagonal
//! architecture:
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
