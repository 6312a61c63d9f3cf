//! Domain model for the section, technician, and component catalog.

mod component;
mod error;
mod ids;
mod name;
mod section;
mod status;
mod technician;

pub use component::{Component, PersistedComponentData};
pub use error::{CatalogDomainError, ParseCatalogStatusError};
pub use ids::{ComponentId, SectionId, TechnicianId};
pub use name::CatalogName;
pub use section::{PersistedSectionData, Section, SectionCode};
pub use status::{CatalogStatus, Listing};
pub use technician::{PersistedTechnicianData, Technician};
