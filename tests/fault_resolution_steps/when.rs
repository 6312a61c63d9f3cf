//! When steps for fault resolution BDD scenarios.

use super::world::{FaultResolutionWorld, run_async};
use maintlog::ledger::services::ResolveRequest;
use rstest_bdd_macros::when;

#[when(r#"the record is resolved with "{description}""#)]
fn resolve_record(
    world: &mut FaultResolutionWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let id = world.record()?.id();
    let result = run_async(
        world
            .workflow
            .resolve(ResolveRequest::new(id, description)),
    );
    if let Ok(ref updated) = result {
        world.record = Some(updated.clone());
    }
    world.last_resolution = Some(result);
    Ok(())
}
