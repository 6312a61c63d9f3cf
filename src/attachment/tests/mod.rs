//! Unit tests for the attachment module.

mod store_tests;
