//! Given steps for request lifecycle BDD scenarios.

use super::world::{RequestLifecycleWorld, parse_devices, run_async};
use loaner::request::{
    domain::{ActorRole, Beneficiary, DeviceKind, FulfillmentUpdate, RequestStatus, RequesterId},
    services::{SubmitLoanRequest, TransitionLoanRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

/// Builds the standard scenario submission payload.
pub fn scenario_submission(devices: Vec<DeviceKind>) -> SubmitLoanRequest {
    SubmitLoanRequest::new(
        RequesterId::new(),
        Beneficiary::new("Muller", "Alex", "Central Primary"),
        devices,
        "Reading and drawing apps",
    )
}

#[given(r#"a request for devices "{devices}""#)]
fn request_for_devices(
    world: &mut RequestLifecycleWorld,
    devices: String,
) -> Result<(), eyre::Report> {
    world.pending_devices = Some(parse_devices(&devices)?);
    Ok(())
}

#[given(r#"a submitted request for devices "{devices}""#)]
fn submitted_request(
    world: &mut RequestLifecycleWorld,
    devices: String,
) -> Result<(), eyre::Report> {
    let kinds = parse_devices(&devices)?;
    let created = run_async(world.service.submit(scenario_submission(kinds)))
        .wrap_err("submit request in scenario setup")?;
    world.current_request = Some(created);
    Ok(())
}

#[given(r#"the request was approved with serial "{serial}" for "{device}""#)]
fn request_was_approved(
    world: &mut RequestLifecycleWorld,
    serial: String,
    device: String,
) -> Result<(), eyre::Report> {
    let request = world
        .current_request
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submitted request in scenario world"))?;
    let kind = DeviceKind::try_from(device.as_str())?;

    let outcome = run_async(
        world.service.transition(
            TransitionLoanRequest::new(
                request.id(),
                ActorRole::Administrator,
                RequestStatus::Approved,
            )
            .with_fulfillment(FulfillmentUpdate::new().with_serial(kind, serial)),
        ),
    )
    .wrap_err("approve request in scenario setup")?;

    world.current_request = Some(outcome.request);
    Ok(())
}
