//! Unit tests for the resolve-once workflow.

use super::support::Harness;
use crate::attachment::domain::UploadedFile;
use crate::error::ErrorKind;
use crate::ledger::{
    domain::{FAULT_REPORT, FaultFilter, Narrative, WorkOrderId},
    services::{CreateRecordRequest, ResolutionError, ResolveRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pump_fault_report_is_resolved_with_gasket_replacement() {
    let harness = Harness::with_pump().await;
    let record = harness
        .ledger
        .create_record(CreateRecordRequest::new("PUMP1", FAULT_REPORT, "leak"))
        .await
        .expect("create");
    assert!(!record.is_resolved());

    harness.clock.set("2024-01-15T11:00");
    let resolved = harness
        .workflow
        .resolve(ResolveRequest::new(record.id(), "gasket replaced"))
        .await
        .expect("resolve");

    assert!(resolved.is_resolved());
    let stored = harness
        .ledger
        .find_record(record.id())
        .await
        .expect("lookup")
        .expect("record exists")
        .record;
    assert_eq!(
        stored.resolution().description().map(Narrative::as_str),
        Some("gasket replaced")
    );
    assert_eq!(
        stored.resolution().resolved_at().map(|s| s.to_storage()),
        Some("2024-01-15T11:00".to_owned())
    );

    let queue = harness
        .ledger
        .fault_reports(FaultFilter::Resolved, Some(10))
        .await
        .expect("queue");
    assert_eq!(queue.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_resolution_is_rejected_and_first_kept() {
    let harness = Harness::with_pump().await;
    let record = harness
        .ledger
        .create_record(CreateRecordRequest::new("PUMP1", FAULT_REPORT, "leak"))
        .await
        .expect("create");
    harness
        .workflow
        .resolve(ResolveRequest::new(record.id(), "first fix"))
        .await
        .expect("first resolve");

    let err = harness
        .workflow
        .resolve(
            ResolveRequest::new(record.id(), "second fix")
                .with_files([UploadedFile::new("after.jpg", "x")]),
        )
        .await
        .expect_err("second resolve");

    assert_eq!(err.kind(), ErrorKind::AlreadyResolved);
    let stored = harness
        .ledger
        .find_record(record.id())
        .await
        .expect("lookup")
        .expect("record exists")
        .record;
    assert_eq!(
        stored.resolution().description().map(Narrative::as_str),
        Some("first fix")
    );
    assert!(harness.blobs.is_empty().expect("lock"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_on_entry_record_cannot_be_resolved() {
    let harness = Harness::with_pump().await;
    let record = harness
        .ledger
        .create_record(CreateRecordRequest::new("PUMP1", "preventive", "greased"))
        .await
        .expect("create");
    let err = harness
        .workflow
        .resolve(ResolveRequest::new(record.id(), "n/a"))
        .await
        .expect_err("not pending");
    assert_eq!(err.kind(), ErrorKind::AlreadyResolved);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_record_is_not_found() {
    let harness = Harness::new();
    let err = harness
        .workflow
        .resolve(ResolveRequest::new(WorkOrderId::new(), "fixed"))
        .await
        .expect_err("unknown record");
    assert!(matches!(err, ResolutionError::NotFound(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_resolution_is_a_validation_failure() {
    let harness = Harness::with_pump().await;
    let record = harness
        .ledger
        .create_record(CreateRecordRequest::new("PUMP1", FAULT_REPORT, "leak"))
        .await
        .expect("create");
    let err = harness
        .workflow
        .resolve(ResolveRequest::new(record.id(), "  "))
        .await
        .expect_err("blank");
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn evidence_joins_the_record_attachment_collection() {
    let harness = Harness::with_pump().await;
    let record = harness
        .ledger
        .create_record(
            CreateRecordRequest::new("PUMP1", FAULT_REPORT, "leak")
                .with_files([UploadedFile::new("before.jpg", "b")]),
        )
        .await
        .expect("create");
    harness.clock.set("2024-01-15T12:00");
    harness
        .workflow
        .resolve(
            ResolveRequest::new(record.id(), "gasket replaced")
                .with_files([UploadedFile::new("after.jpg", "a")]),
        )
        .await
        .expect("resolve");

    let files = harness.ledger.attachments(record.id()).await.expect("list");
    let names: Vec<&str> = files.iter().map(|a| a.filename()).collect();
    assert_eq!(names, vec!["before.jpg", "after.jpg"]);
}
