//! Intake repository adapters.

pub mod memory;
pub mod sqlite;
