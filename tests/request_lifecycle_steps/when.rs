//! When steps for request lifecycle BDD scenarios.

use super::world::{RequestLifecycleWorld, run_async};
use loaner::request::{
    domain::{ActorRole, DeviceKind, FulfillmentUpdate, RequestStatus},
    services::TransitionLoanRequest,
};
use rstest_bdd_macros::when;

#[when("the request is submitted")]
fn submit_request(world: &mut RequestLifecycleWorld) -> Result<(), eyre::Report> {
    let devices = world
        .pending_devices
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending device list in scenario world"))?;
    let payload = super::given::scenario_submission(devices);

    let created = run_async(world.service.submit(payload))?;
    world.current_request = Some(created);
    Ok(())
}

/// Applies a transition and records the outcome for the then steps.
fn apply_transition(
    world: &mut RequestLifecycleWorld,
    target: &str,
    fulfillment: FulfillmentUpdate,
) -> Result<(), eyre::Report> {
    let request = world
        .current_request
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submitted request in scenario world"))?;
    let status = RequestStatus::try_from(target)?;

    let result = run_async(
        world.service.transition(
            TransitionLoanRequest::new(request.id(), ActorRole::Administrator, status)
                .with_fulfillment(fulfillment),
        ),
    );
    if let Ok(ref outcome) = result {
        world.current_request = Some(outcome.request.clone());
    }
    world.last_transition = Some(result);
    Ok(())
}

#[when("an administrator moves it to {target:string}")]
fn move_to(world: &mut RequestLifecycleWorld, target: String) -> Result<(), eyre::Report> {
    apply_transition(world, &target, FulfillmentUpdate::new())
}

#[when("an administrator moves it to {target:string} with serial {serial:string} for {device:string}")]
fn move_to_with_serial(
    world: &mut RequestLifecycleWorld,
    target: String,
    serial: String,
    device: String,
) -> Result<(), eyre::Report> {
    let kind = DeviceKind::try_from(device.as_str())?;
    apply_transition(
        world,
        &target,
        FulfillmentUpdate::new().with_serial(kind, serial),
    )
}

#[when(
    "an administrator moves it to {target:string} with serial {serial:string} for {device:string} and asset tag {tag:string}"
)]
fn move_to_with_serial_and_tag(
    world: &mut RequestLifecycleWorld,
    target: String,
    serial: String,
    device: String,
    tag: String,
) -> Result<(), eyre::Report> {
    let kind = DeviceKind::try_from(device.as_str())?;
    apply_transition(
        world,
        &target,
        FulfillmentUpdate::new()
            .with_serial(kind, serial)
            .with_asset_tag(kind, tag),
    )
}
