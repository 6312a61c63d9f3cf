//! Blob store adapters.

pub mod directory;
pub mod memory;
