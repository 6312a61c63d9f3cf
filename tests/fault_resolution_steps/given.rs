//! Given steps for fault resolution BDD scenarios.

use super::world::{FaultResolutionWorld, run_async};
use eyre::WrapErr;
use maintlog::ledger::services::{CreateRecordRequest, ResolveRequest};
use rstest_bdd_macros::given;

#[given(r#"a section "{code}" named "{name}""#)]
fn section_exists(
    world: &mut FaultResolutionWorld,
    code: String,
    name: String,
) -> Result<(), eyre::Report> {
    run_async(world.catalog.upsert_section(&code, &name, ""))
        .wrap_err("register section for scenario")?;
    Ok(())
}

#[given(r#"a "{work_type}" record on "{code}" saying "{description}""#)]
fn record_exists(
    world: &mut FaultResolutionWorld,
    work_type: String,
    code: String,
    description: String,
) -> Result<(), eyre::Report> {
    let record = run_async(
        world
            .ledger
            .create_record(CreateRecordRequest::new(code, work_type, description)),
    )
    .wrap_err("create record for scenario")?;
    world.record = Some(record);
    Ok(())
}

#[given(r#"the record has been resolved with "{description}""#)]
fn record_already_resolved(
    world: &mut FaultResolutionWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let id = world.record()?.id();
    let resolved = run_async(
        world
            .workflow
            .resolve(ResolveRequest::new(id, description)),
    )
    .wrap_err("resolve record in scenario setup")?;
    world.record = Some(resolved);
    Ok(())
}
