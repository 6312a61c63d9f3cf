//! Catalog persistence tests against SQLite.

use crate::sqlite::helpers::sqlite_harness;
use maintlog::catalog::{
    domain::{CatalogName, Listing, PersistedSectionData, Section, SectionCode},
    ports::CatalogRepository,
};
use maintlog::ledger::services::CreateRecordRequest;

#[tokio::test(flavor = "multi_thread")]
async fn double_upsert_keeps_one_section() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;

    assert!(harness.catalog.upsert_section("PUMP1", "Pump", "first").await?);
    assert!(!harness.catalog.upsert_section("pump1", "Other", "second").await?);

    let sections = harness.catalog.list_sections().await?;
    assert_eq!(sections.len(), 1);
    let pump = sections.first().ok_or_else(|| eyre::eyre!("no section"))?;
    assert_eq!(pump.code().as_str(), "PUMP1");
    assert_eq!(pump.description(), "first");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unique_index_rejects_second_section_with_same_code() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    let first = Section::new(SectionCode::new("PUMP1")?, CatalogName::new("Pump")?, "");
    let second = Section::new(SectionCode::new("PUMP1")?, CatalogName::new("Pump")?, "");

    assert!(harness.catalog_repo.insert_section_if_absent(&first).await?);
    assert!(!harness.catalog_repo.insert_section_if_absent(&second).await?);

    let stored = harness
        .catalog_repo
        .find_section_by_code(&SectionCode::new("PUMP1")?)
        .await?
        .ok_or_else(|| eyre::eyre!("section missing"))?;
    assert_eq!(stored.id(), first.id());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn only_code_conflicts_are_silent() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    let first = Section::new(SectionCode::new("PUMP1")?, CatalogName::new("Pump")?, "");
    let same_id = Section::from_persisted(PersistedSectionData {
        id: first.id(),
        code: SectionCode::new("PUMP2")?,
        name: CatalogName::new("Pump 2")?,
        description: String::new(),
    });

    assert!(harness.catalog_repo.insert_section_if_absent(&first).await?);
    assert!(
        harness
            .catalog_repo
            .insert_section_if_absent(&same_id)
            .await
            .is_err()
    );
    assert!(
        harness
            .catalog_repo
            .find_section_by_code(&SectionCode::new("PUMP2")?)
            .await?
            .is_none()
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn retired_technician_still_named_in_reports() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("PUMP1", "Pump", "").await?;
    let technician = harness.catalog.add_technician("Operator A", None).await?;
    let record = harness
        .ledger
        .create_record(
            CreateRecordRequest::new("PUMP1", "preventive", "greased bearings")
                .with_technician(technician.id()),
        )
        .await?;

    harness.catalog.deactivate_technician(technician.id()).await?;

    let selectable = harness.catalog.list_technicians(Listing::Selectable).await?;
    assert!(selectable.is_empty());
    let historical = harness.catalog.list_technicians(Listing::Historical).await?;
    assert_eq!(historical.len(), 1);

    let view = harness
        .ledger
        .find_record(record.id())
        .await?
        .ok_or_else(|| eyre::eyre!("record missing"))?;
    assert_eq!(
        view.technician_name.as_ref().map(CatalogName::as_str),
        Some("Operator A")
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn seeding_twice_is_idempotent() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;

    let first = harness.catalog.seed_defaults().await?;
    let second = harness.catalog.seed_defaults().await?;

    assert_eq!(first.sections_added, 9);
    assert_eq!(first.technicians_added, 3);
    assert_eq!(second.sections_added, 0);
    assert_eq!(second.technicians_added, 0);
    assert_eq!(harness.catalog.list_sections().await?.len(), 9);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn components_require_known_section() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("CHAINS", "Chains", "").await?;

    harness.catalog.add_component("CHAINS", "Drive chain").await?;
    assert!(harness.catalog.add_component("NOPE", "Roller").await.is_err());

    let components = harness
        .catalog
        .list_components("CHAINS", Listing::Selectable)
        .await?;
    assert_eq!(components.len(), 1);
    Ok(())
}
