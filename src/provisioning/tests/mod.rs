//! Unit tests for the provisioning listing.
