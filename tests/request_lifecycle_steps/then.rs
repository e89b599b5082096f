//! Then steps for request lifecycle BDD scenarios.

use super::world::{RequestLifecycleWorld, run_async};
use eyre::ensure;
use loaner::request::domain::RequestStatus;
use rstest_bdd_macros::then;

#[then(r#"the request status is "{status}""#)]
fn request_status_is(
    world: &mut RequestLifecycleWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let request = world
        .current_request
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing request in scenario world"))?;
    let expected = RequestStatus::try_from(status.as_str())?;

    // Assert against the stored state, not the in-memory copy.
    let stored = run_async(world.service.find_by_id(request.id()))?
        .ok_or_else(|| eyre::eyre!("request vanished from the repository"))?;
    ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("the transition is rejected")]
fn transition_rejected(world: &mut RequestLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no transition was attempted in this scenario"))?;
    ensure!(result.is_err(), "expected the transition to be rejected");
    Ok(())
}

#[then("the official document has been generated")]
fn document_generated(world: &mut RequestLifecycleWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_transition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no transition was attempted in this scenario"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("transition failed: {err}"))?;

    ensure!(
        outcome.document.is_some(),
        "expected the transition to carry the rendered document"
    );
    ensure!(outcome.request.document_generated_at().is_some());
    Ok(())
}
