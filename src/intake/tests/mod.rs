//! Unit tests for the intake module.
