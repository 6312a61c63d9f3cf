//! Section lookups shared by the record and intake services.

use crate::catalog::{
    domain::{Section, SectionCode},
    ports::{CatalogRepository, CatalogRepositoryResult},
};

/// Finds a section by a raw, caller-supplied code.
///
/// A code that fails normalization cannot name any section, so it yields
/// `Ok(None)` like any other unknown code.
pub(crate) async fn section_by_raw_code<K>(
    catalog: &K,
    raw: &str,
) -> CatalogRepositoryResult<Option<Section>>
where
    K: CatalogRepository + ?Sized,
{
    match SectionCode::new(raw) {
        Ok(code) => catalog.find_section_by_code(&code).await,
        Err(_) => Ok(None),
    }
}
