//! Unit tests for catalog service orchestration.

use std::sync::Arc;

use crate::catalog::{
    adapters::memory::InMemoryCatalogRepository,
    domain::{CatalogStatus, Listing, TechnicianId},
    services::{CatalogService, CatalogServiceError, SeedPlan, SeedTechnician},
};
use crate::error::ErrorKind;
use rstest::{fixture, rstest};

type TestService = CatalogService<InMemoryCatalogRepository>;

#[fixture]
fn service() -> TestService {
    CatalogService::new(Arc::new(InMemoryCatalogRepository::new()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upsert_section_twice_keeps_first_row(service: TestService) {
    let first = service
        .upsert_section("PUMP1", "Pump", "Main pump")
        .await
        .expect("first upsert");
    let second = service
        .upsert_section("pump1", "Renamed", "Other")
        .await
        .expect("second upsert");

    assert!(first);
    assert!(!second);

    let sections = service.list_sections().await.expect("list");
    assert_eq!(sections.len(), 1);
    let section = sections.first().expect("one section");
    assert_eq!(section.name().as_str(), "Pump");
    assert_eq!(section.description(), "Main pump");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upsert_section_rejects_invalid_code(service: TestService) {
    let err = service
        .upsert_section("PUMP 1", "Pump", "")
        .await
        .expect_err("invalid code");
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sections_are_listed_by_name(service: TestService) {
    service.upsert_section("B", "Zeta", "").await.expect("b");
    service.upsert_section("A", "Alpha", "").await.expect("a");

    let names: Vec<String> = service
        .list_sections()
        .await
        .expect("list")
        .iter()
        .map(|s| s.name().as_str().to_owned())
        .collect();
    assert_eq!(names, vec!["Alpha", "Zeta"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_section_overwrites_name_and_description(service: TestService) {
    service
        .upsert_section("PUMP1", "Pump", "")
        .await
        .expect("upsert");
    let section = service.section_by_code("PUMP1").await.expect("find");

    let edited = service
        .edit_section(section.id(), "Main pump", "Primary water pump")
        .await
        .expect("edit");

    let found = service
        .find_section_by_code("pump1")
        .await
        .expect("lookup")
        .expect("section exists");
    assert_eq!(found, edited);
    assert_eq!(found.description(), "Primary water pump");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_section_code_is_not_found(service: TestService) {
    let err = service
        .section_by_code("NOPE")
        .await
        .expect_err("missing section");
    assert!(matches!(err, CatalogServiceError::UnknownSectionCode(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retired_technician_leaves_selectable_listing_but_resolves_by_id(service: TestService) {
    let ana = service
        .add_technician("Operator A", Some("mechanic"))
        .await
        .expect("add a");
    service
        .add_technician("Operator B", None)
        .await
        .expect("add b");

    service
        .deactivate_technician(ana.id())
        .await
        .expect("retire");

    let selectable = service
        .list_technicians(Listing::Selectable)
        .await
        .expect("selectable");
    assert_eq!(selectable.len(), 1);
    assert!(selectable.iter().all(|t| t.id() != ana.id()));

    let historical = service
        .list_technicians(Listing::Historical)
        .await
        .expect("historical");
    let statuses: Vec<CatalogStatus> = historical.iter().map(|t| t.status()).collect();
    assert_eq!(statuses, vec![CatalogStatus::Active, CatalogStatus::Retired]);

    let found = service
        .find_technician(ana.id())
        .await
        .expect("lookup")
        .expect("retired technician still resolvable");
    assert_eq!(found.status(), CatalogStatus::Retired);
    assert_eq!(found.role(), Some("mechanic"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivating_unknown_technician_is_not_found(service: TestService) {
    let err = service
        .deactivate_technician(TechnicianId::new())
        .await
        .expect_err("unknown technician");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn components_require_an_existing_section(service: TestService) {
    let err = service
        .add_component("PUMP1", "Impeller")
        .await
        .expect_err("section missing");
    assert!(matches!(err, CatalogServiceError::UnknownSectionCode(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retired_components_are_listed_only_historically(service: TestService) {
    service
        .upsert_section("PUMP1", "Pump", "")
        .await
        .expect("section");
    let impeller = service
        .add_component("PUMP1", "Impeller")
        .await
        .expect("impeller");
    service
        .add_component("pump1", "Seal")
        .await
        .expect("seal");

    service
        .deactivate_component(impeller.id())
        .await
        .expect("retire");

    let selectable = service
        .list_components("PUMP1", Listing::Selectable)
        .await
        .expect("selectable");
    let names: Vec<&str> = selectable.iter().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["Seal"]);

    let historical = service
        .list_components("PUMP1", Listing::Historical)
        .await
        .expect("historical");
    assert_eq!(historical.len(), 2);
    assert_eq!(historical.last().map(|c| c.id()), Some(impeller.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeding_twice_is_idempotent(service: TestService) {
    let mut plan = SeedPlan::default_line();
    plan.technicians.push(SeedTechnician {
        name: "Shift lead".to_owned(),
        role: Some("supervisor".to_owned()),
    });

    let first = service.seed(&plan).await.expect("first seed");
    let second = service.seed(&plan).await.expect("second seed");

    assert_eq!(first.sections_added, 9);
    assert_eq!(first.technicians_added, 4);
    assert_eq!(second.sections_added, 0);
    assert_eq!(second.technicians_added, 0);
    assert_eq!(service.list_sections().await.expect("list").len(), 9);
    assert_eq!(
        service
            .list_technicians(Listing::Historical)
            .await
            .expect("technicians")
            .len(),
        4
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_seed_registers_starting_crew(service: TestService) {
    let report = service.seed_defaults().await.expect("seed");
    assert_eq!(report.technicians_added, 3);

    let crew = service
        .list_technicians(Listing::Selectable)
        .await
        .expect("technicians");
    let names: Vec<&str> = crew.iter().map(|t| t.name().as_str()).collect();
    assert_eq!(names, vec!["Ignacio", "Jose", "Walker"]);
    assert_eq!(crew.first().and_then(|t| t.role()), Some("Line lead"));
}
