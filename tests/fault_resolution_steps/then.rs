//! Then steps for fault resolution BDD scenarios.

use super::world::{FaultResolutionWorld, run_async};
use eyre::WrapErr;
use maintlog::error::ErrorKind;
use maintlog::ledger::domain::FaultFilter;
use rstest_bdd_macros::then;

#[then("the record is resolved")]
fn record_is_resolved(world: &FaultResolutionWorld) -> Result<(), eyre::Report> {
    let id = world.record()?.id();
    let stored = run_async(world.ledger.find_record(id))
        .wrap_err("reload record")?
        .ok_or_else(|| eyre::eyre!("record {id} vanished"))?;
    if !stored.record.is_resolved() {
        return Err(eyre::eyre!("expected record {id} to be resolved"));
    }
    Ok(())
}

#[then(r#"the resolution reads "{description}""#)]
fn resolution_reads(
    world: &FaultResolutionWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let id = world.record()?.id();
    let stored = run_async(world.ledger.find_record(id))
        .wrap_err("reload record")?
        .ok_or_else(|| eyre::eyre!("record {id} vanished"))?;
    let actual = stored
        .record
        .resolution()
        .description()
        .map(|narrative| narrative.as_str().to_owned());
    if actual.as_deref() != Some(description.as_str()) {
        return Err(eyre::eyre!(
            "expected resolution {description:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then("the resolution fails as already resolved")]
fn resolution_fails_already_resolved(world: &FaultResolutionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_resolution
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing resolution result"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::AlreadyResolved => Ok(()),
        other => Err(eyre::eyre!("expected AlreadyResolved, got {other:?}")),
    }
}

#[then("the pending queue is empty")]
fn pending_queue_is_empty(world: &FaultResolutionWorld) -> Result<(), eyre::Report> {
    expect_pending(world, 0)
}

#[then("the pending queue holds {count:u64} record")]
fn pending_queue_holds(world: &FaultResolutionWorld, count: u64) -> Result<(), eyre::Report> {
    expect_pending(world, usize::try_from(count)?)
}

fn expect_pending(world: &FaultResolutionWorld, count: usize) -> Result<(), eyre::Report> {
    let queue = run_async(world.ledger.fault_reports(FaultFilter::Pending, None))
        .wrap_err("load pending queue")?;
    if queue.len() != count {
        return Err(eyre::eyre!(
            "expected {count} pending reports, found {}",
            queue.len()
        ));
    }
    Ok(())
}
