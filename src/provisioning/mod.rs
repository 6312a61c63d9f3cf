//! Read-only section listing for the external code-provisioning tool.
//!
//! The tool prints one scannable code per section. This module exposes the
//! section catalog in a flat shape and renders each section's scan URL from
//! a `minijinja` template such as `{{ base_url }}/{{ code }}`.

mod listing;
mod service;

pub use listing::{ScanTarget, SectionListing};
pub use service::{
    DEFAULT_SCAN_URL_TEMPLATE, ProvisioningError, ProvisioningResult, ProvisioningService,
};

#[cfg(test)]
mod tests;
