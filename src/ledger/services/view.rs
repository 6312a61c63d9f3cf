//! Reporting view joining records with catalog names.

use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::{
    domain::{CatalogName, Section, SectionCode, SectionId, Technician, TechnicianId},
    ports::{CatalogRepository, CatalogRepositoryResult},
};
use crate::ledger::domain::WorkOrder;

/// A record with its section and technician resolved for display.
///
/// Technician names resolve whatever the technician's current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordView {
    /// The record itself.
    pub record: WorkOrder,
    /// Code of the record's section.
    pub section_code: Option<SectionCode>,
    /// Name of the record's section.
    pub section_name: Option<CatalogName>,
    /// Name of the filing technician.
    pub technician_name: Option<CatalogName>,
}

pub(super) async fn build_views<K>(
    catalog: &K,
    records: Vec<WorkOrder>,
) -> CatalogRepositoryResult<Vec<RecordView>>
where
    K: CatalogRepository + ?Sized,
{
    let mut sections: HashMap<SectionId, Option<Section>> = HashMap::new();
    let mut technicians: HashMap<TechnicianId, Option<Technician>> = HashMap::new();
    let mut views = Vec::with_capacity(records.len());

    for record in records {
        let section_id = record.section_id();
        if !sections.contains_key(&section_id) {
            let found = catalog.find_section(section_id).await?;
            sections.insert(section_id, found);
        }
        let section = sections.get(&section_id).and_then(Option::as_ref);

        let mut technician_name = None;
        if let Some(technician_id) = record.technician_id() {
            if !technicians.contains_key(&technician_id) {
                let found = catalog.find_technician(technician_id).await?;
                technicians.insert(technician_id, found);
            }
            technician_name = technicians
                .get(&technician_id)
                .and_then(Option::as_ref)
                .map(|technician| technician.name().clone());
        }

        views.push(RecordView {
            section_code: section.map(|found| found.code().clone()),
            section_name: section.map(|found| found.name().clone()),
            technician_name,
            record,
        });
    }
    Ok(views)
}
