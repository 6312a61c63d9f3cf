//! Work order repository adapters.

pub mod memory;
pub mod sqlite;
