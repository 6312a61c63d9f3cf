//! Unit tests for the ledger module.

mod resolution_tests;
mod support;
