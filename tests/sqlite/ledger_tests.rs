//! Ledger persistence tests against SQLite.

use crate::sqlite::helpers::sqlite_harness;
use maintlog::attachment::domain::UploadedFile;
use maintlog::error::ErrorKind;
use maintlog::ledger::{
    domain::{FaultFilter, Narrative},
    ports::{WorkOrderRepository, WorkOrderRepositoryError},
    services::{CreateRecordRequest, ResolveRequest},
};

#[tokio::test(flavor = "multi_thread")]
async fn pump_fault_report_is_resolved_once() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("PUMP1", "Pump", "").await?;

    let report = harness
        .ledger
        .create_record(
            CreateRecordRequest::new("PUMP1", "fault report", "seal leaking")
                .with_machine_stopped(true)
                .with_downtime_minutes(45),
        )
        .await?;
    assert!(!report.is_resolved());

    harness.clock.set("2024-01-15T11:05");
    let resolved = harness
        .workflow
        .resolve(ResolveRequest::new(report.id(), "gasket replaced"))
        .await?;
    assert!(resolved.is_resolved());

    let stored = harness
        .ledger
        .find_record(report.id())
        .await?
        .ok_or_else(|| eyre::eyre!("record missing"))?
        .record;
    assert_eq!(
        stored.resolution().description().map(Narrative::as_str),
        Some("gasket replaced")
    );
    assert_eq!(
        stored.resolution().resolved_at().map(|stamp| stamp.to_storage()),
        Some("2024-01-15T11:05".to_owned())
    );
    assert_eq!(stored.downtime_minutes(), 45);
    assert!(stored.machine_stopped());

    let err = harness
        .workflow
        .resolve(ResolveRequest::new(report.id(), "pump swapped"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("second resolution succeeded"))?;
    assert_eq!(err.kind(), ErrorKind::AlreadyResolved);

    let after = harness
        .ledger
        .find_record(report.id())
        .await?
        .ok_or_else(|| eyre::eyre!("record missing"))?
        .record;
    assert_eq!(after, stored);
    assert!(
        harness
            .ledger
            .fault_reports(FaultFilter::Pending, None)
            .await?
            .is_empty()
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn guarded_update_rejects_stale_copy() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("PUMP1", "Pump", "").await?;
    let report = harness
        .ledger
        .create_record(CreateRecordRequest::new("PUMP1", "fault report", "noise"))
        .await?;

    let mut first = harness
        .work_orders
        .find_by_id(report.id())
        .await?
        .ok_or_else(|| eyre::eyre!("record missing"))?;
    let mut stale = first.clone();

    first.resolve(Narrative::new("resolution", "tightened")?, &*harness.clock)?;
    harness.work_orders.resolve(&first, &[]).await?;

    stale.resolve(Narrative::new("resolution", "replaced")?, &*harness.clock)?;
    let result = harness.work_orders.resolve(&stale, &[]).await;
    assert!(matches!(
        result,
        Err(WorkOrderRepositoryError::AlreadyResolved(id)) if id == report.id()
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_resolutions_have_one_winner() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("PUMP1", "Pump", "").await?;
    let report = harness
        .ledger
        .create_record(CreateRecordRequest::new("PUMP1", "fault report", "noise"))
        .await?;

    let (left, right) = tokio::join!(
        harness
            .workflow
            .resolve(ResolveRequest::new(report.id(), "fixed by day shift")),
        harness
            .workflow
            .resolve(ResolveRequest::new(report.id(), "fixed by night shift")),
    );

    let outcomes = [left, right];
    let winners = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let losers = outcomes
        .iter()
        .filter(|outcome| {
            matches!(outcome, Err(err) if err.kind() == ErrorKind::AlreadyResolved)
        })
        .count();
    assert_eq!((winners, losers), (1, 1));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_photo_names_get_suffixes() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("PUMP1", "Pump", "").await?;

    let report = harness
        .ledger
        .create_record(
            CreateRecordRequest::new("PUMP1", "fault report", "seal leaking")
                .with_files([UploadedFile::new("photo.jpg", "before")]),
        )
        .await?;
    harness
        .workflow
        .resolve(
            ResolveRequest::new(report.id(), "gasket replaced")
                .with_files([UploadedFile::new("photo.jpg", "after")]),
        )
        .await?;

    let attachments = harness.ledger.attachments(report.id()).await?;
    let names: Vec<&str> = attachments.iter().map(|a| a.filename()).collect();
    assert_eq!(names, vec!["photo.jpg", "photo_1.jpg"]);

    assert_eq!(harness.ledger.open_attachment("photo.jpg").await?, b"before");
    assert_eq!(harness.ledger.open_attachment("photo_1.jpg").await?, b"after");
    assert!(harness.dir.path().join("uploads").join("photo_1.jpg").is_file());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn date_range_is_inclusive_and_newest_first() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("PUMP1", "Pump", "").await?;
    harness.catalog.upsert_section("CHAINS", "Chains", "").await?;

    for (stamp, code, text) in [
        ("2023-12-31T23:59", "PUMP1", "before"),
        ("2024-01-01T00:00", "PUMP1", "first day"),
        ("2024-01-15T10:00", "CHAINS", "middle"),
        ("2024-01-31T23:59", "PUMP1", "last minute"),
        ("2024-02-01T00:00", "PUMP1", "after"),
    ] {
        harness.clock.set(stamp);
        harness
            .ledger
            .create_record(CreateRecordRequest::new(code, "preventive", text))
            .await?;
    }

    let all = harness
        .ledger
        .records_in_range("2024-01-01", "2024-01-31", None)
        .await?;
    let texts: Vec<&str> = all.iter().map(|v| v.record.description().as_str()).collect();
    assert_eq!(texts, vec!["last minute", "middle", "first day"]);

    let pump_only = harness
        .ledger
        .records_in_range("2024-01-01", "2024-01-31", Some("PUMP1"))
        .await?;
    assert_eq!(pump_only.len(), 2);

    let err = harness
        .ledger
        .records_in_range("2024-02-01", "2024-01-01", None)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("inverted window accepted"))?;
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn section_history_respects_limit() -> eyre::Result<()> {
    let harness = sqlite_harness().await?;
    harness.catalog.upsert_section("PUMP1", "Pump", "").await?;
    for (stamp, text) in [
        ("2024-01-01T08:00", "one"),
        ("2024-01-02T08:00", "two"),
        ("2024-01-03T08:00", "three"),
    ] {
        harness.clock.set(stamp);
        harness
            .ledger
            .create_record(CreateRecordRequest::new("PUMP1", "inspection", text))
            .await?;
    }

    let recent = harness.ledger.records_for_section("pump1", 2).await?;
    let texts: Vec<&str> = recent
        .iter()
        .map(|v| v.record.description().as_str())
        .collect();
    assert_eq!(texts, vec!["three", "two"]);
    Ok(())
}
