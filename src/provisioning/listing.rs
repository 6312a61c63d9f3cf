//! Flat views of sections handed to the provisioning tool.

use crate::catalog::domain::{Section, SectionId};
use serde::Serialize;

/// One section as listed for provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionListing {
    /// Internal identifier.
    pub id: SectionId,
    /// External code embedded in the scan target.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-text description, possibly empty.
    pub description: String,
}

impl From<&Section> for SectionListing {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id(),
            code: section.code().as_str().to_owned(),
            name: section.name().as_str().to_owned(),
            description: section.description().to_owned(),
        }
    }
}

/// A section paired with the URL its printed code should open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanTarget {
    /// The listed section.
    #[serde(flatten)]
    pub section: SectionListing,
    /// Rendered scan URL.
    pub url: String,
}
