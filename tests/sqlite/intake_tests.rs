//! Intake persistence tests against SQLite.

use crate::sqlite::helpers::sqlite_harness;
use maintlog::attachment::domain::UploadedFile;
use maintlog::intake::{
    domain::{INITIAL_STATUS, IntakeKind, Requester},
    services::{HelpRequest, SparePartRequest},
};

#[tokio::test(flavor = "multi_thread")]
async fn spare_request_round_trips_with_photo() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("CHAINS", "Chains", "").await?;
    let technician = harness.catalog.add_technician("Operator A", None).await?;

    let filed = harness
        .intake
        .submit_spare_request(
            SparePartRequest::new("two drive chains")
                .with_section("CHAINS")
                .with_technician(technician.id())
                .with_photo(UploadedFile::new("chain.jpg", "img").with_mime_type("image/jpeg")),
        )
        .await?;

    let stored = harness
        .intake
        .find_intake(filed.id())
        .await?
        .ok_or_else(|| eyre::eyre!("request missing"))?;
    assert_eq!(stored, filed);
    assert_eq!(stored.status(), INITIAL_STATUS);
    assert_eq!(
        stored.photo().map(|photo| photo.filename.as_str()),
        Some("chain.jpg")
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn help_requests_list_separately_newest_first() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.clock.set("2024-03-01T09:00");
    harness
        .intake
        .submit_help_request(HelpRequest::new("Visitor", "strange smell").with_contact("ext 42"))
        .await?;
    harness.clock.set("2024-03-02T09:00");
    harness
        .intake
        .submit_help_request(HelpRequest::new("Driver", "blocked gate"))
        .await?;
    harness
        .intake
        .submit_spare_request(SparePartRequest::new("bolts"))
        .await?;

    let help = harness.intake.list_intake(IntakeKind::Help, 10).await?;
    let texts: Vec<&str> = help.iter().map(|r| r.description()).collect();
    assert_eq!(texts, vec!["blocked gate", "strange smell"]);
    assert_eq!(
        help.last().map(|r| r.requester().clone()),
        Some(Requester::Contact {
            name: "Visitor".to_owned(),
            contact: Some("ext 42".to_owned()),
        })
    );

    let spares = harness.intake.list_intake(IntakeKind::SparePart, 10).await?;
    assert_eq!(spares.len(), 1);
    Ok(())
}
