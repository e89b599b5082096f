//! Unit tests for the workflow state machine and the lifecycle engine.

use crate::request::domain::{
    ActorRole, Beneficiary, ContactDetails, DeviceKind, FulfillmentUpdate, LoanRequest,
    NewLoanRequest, RequestDomainError, RequestStatus, RequestValidationError, RequesterId,
    TransitionCommand,
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn submitted(devices: &[DeviceKind]) -> eyre::Result<LoanRequest> {
    let payload = NewLoanRequest {
        requester_id: RequesterId::new(),
        beneficiary: Beneficiary::new("Muller", "Alex", "Central Primary"),
        devices: devices.iter().copied().collect(),
        application_requirements: "Reading apps".to_owned(),
        contact: ContactDetails::new(),
        logistics: None,
    };
    Ok(LoanRequest::submit(payload, &DefaultClock)?)
}

fn admin(target: RequestStatus) -> TransitionCommand {
    TransitionCommand::new(ActorRole::Administrator, target)
}

#[rstest]
#[case(RequestStatus::Pending, RequestStatus::Pending, false)]
#[case(RequestStatus::Pending, RequestStatus::Approved, true)]
#[case(RequestStatus::Pending, RequestStatus::Refused, true)]
#[case(RequestStatus::Pending, RequestStatus::Prepared, false)]
#[case(RequestStatus::Pending, RequestStatus::Contacted, false)]
#[case(RequestStatus::Pending, RequestStatus::Completed, false)]
#[case(RequestStatus::Approved, RequestStatus::Pending, false)]
#[case(RequestStatus::Approved, RequestStatus::Approved, false)]
#[case(RequestStatus::Approved, RequestStatus::Refused, false)]
#[case(RequestStatus::Approved, RequestStatus::Prepared, true)]
#[case(RequestStatus::Approved, RequestStatus::Contacted, false)]
#[case(RequestStatus::Approved, RequestStatus::Completed, false)]
#[case(RequestStatus::Refused, RequestStatus::Pending, false)]
#[case(RequestStatus::Refused, RequestStatus::Approved, false)]
#[case(RequestStatus::Refused, RequestStatus::Refused, false)]
#[case(RequestStatus::Refused, RequestStatus::Prepared, false)]
#[case(RequestStatus::Refused, RequestStatus::Contacted, false)]
#[case(RequestStatus::Refused, RequestStatus::Completed, false)]
#[case(RequestStatus::Prepared, RequestStatus::Pending, false)]
#[case(RequestStatus::Prepared, RequestStatus::Approved, false)]
#[case(RequestStatus::Prepared, RequestStatus::Refused, false)]
#[case(RequestStatus::Prepared, RequestStatus::Prepared, false)]
#[case(RequestStatus::Prepared, RequestStatus::Contacted, true)]
#[case(RequestStatus::Prepared, RequestStatus::Completed, false)]
#[case(RequestStatus::Contacted, RequestStatus::Pending, false)]
#[case(RequestStatus::Contacted, RequestStatus::Approved, false)]
#[case(RequestStatus::Contacted, RequestStatus::Refused, false)]
#[case(RequestStatus::Contacted, RequestStatus::Prepared, false)]
#[case(RequestStatus::Contacted, RequestStatus::Contacted, false)]
#[case(RequestStatus::Contacted, RequestStatus::Completed, true)]
#[case(RequestStatus::Completed, RequestStatus::Pending, false)]
#[case(RequestStatus::Completed, RequestStatus::Approved, false)]
#[case(RequestStatus::Completed, RequestStatus::Refused, false)]
#[case(RequestStatus::Completed, RequestStatus::Prepared, false)]
#[case(RequestStatus::Completed, RequestStatus::Contacted, false)]
#[case(RequestStatus::Completed, RequestStatus::Completed, false)]
fn can_transition_to_returns_expected(
    #[case] from: RequestStatus,
    #[case] to: RequestStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(RequestStatus::Pending, false)]
#[case(RequestStatus::Approved, false)]
#[case(RequestStatus::Refused, true)]
#[case(RequestStatus::Prepared, false)]
#[case(RequestStatus::Contacted, false)]
#[case(RequestStatus::Completed, true)]
fn is_terminal_returns_expected(#[case] status: RequestStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
fn non_administrator_cannot_transition(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Stylus])?;
    let command = TransitionCommand::new(ActorRole::Requester, RequestStatus::Approved);

    let result = request.apply_transition(&command, &clock);

    ensure!(
        result
            == Err(RequestDomainError::NotAuthorized {
                role: ActorRole::Requester,
            })
    );
    ensure!(request.status() == RequestStatus::Pending);
    Ok(())
}

#[rstest]
fn skipping_approval_is_rejected(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Laptop])?;
    let command = admin(RequestStatus::Prepared)
        .with_fulfillment(FulfillmentUpdate::new().with_serial(DeviceKind::Laptop, "SN7"));

    let result = request.apply_transition(&command, &clock);

    ensure!(
        result
            == Err(RequestDomainError::InvalidStatusTransition {
                from: RequestStatus::Pending,
                to: RequestStatus::Prepared,
            })
    );
    ensure!(request.status() == RequestStatus::Pending);
    ensure!(request.device_serials().is_empty());
    Ok(())
}

#[rstest]
fn tracked_device_needs_serial_for_approval(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Tablet])?;
    let command = admin(RequestStatus::Approved).with_admin_notes("ready");

    let result = request.apply_transition(&command, &clock);

    ensure!(
        result
            == Err(RequestDomainError::Validation(
                RequestValidationError::MissingSerialNumber {
                    device: DeviceKind::Tablet,
                    target: RequestStatus::Approved,
                }
            ))
    );
    // All-or-nothing: the rejected command must not have applied the notes.
    ensure!(request.admin_notes().is_empty());
    ensure!(request.status() == RequestStatus::Pending);
    Ok(())
}

#[rstest]
fn stylus_only_request_approves_without_serial(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Stylus])?;

    let effects = request.apply_transition(&admin(RequestStatus::Approved), &clock)?;

    ensure!(request.status() == RequestStatus::Approved);
    ensure!(effects.previous_status == RequestStatus::Pending);
    ensure!(!effects.generate_document);
    Ok(())
}

#[rstest]
fn tablet_and_stylus_lifecycle_generates_document_once(
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Tablet, DeviceKind::Stylus])?;

    // Approval only needs the tablet serial; the stylus carries none.
    let approve = admin(RequestStatus::Approved)
        .with_fulfillment(FulfillmentUpdate::new().with_serial(DeviceKind::Tablet, "SN1"));
    let approve_effects = request.apply_transition(&approve, &clock)?;
    ensure!(!approve_effects.generate_document);
    ensure!(request.document_generated_at().is_none());

    let prepare = admin(RequestStatus::Prepared)
        .with_fulfillment(FulfillmentUpdate::new().with_asset_tag(DeviceKind::Tablet, "H12345"));
    let prepare_effects = request.apply_transition(&prepare, &clock)?;
    ensure!(prepare_effects.generate_document);
    let generated_at = request.document_generated_at();
    ensure!(generated_at.is_some());

    // Re-submitting the same transition is the same-state no-op path; it
    // must never fire document generation a second time.
    let second_attempt = request.apply_transition(&prepare, &clock)?;
    ensure!(!second_attempt.generate_document);
    ensure!(request.document_generated_at() == generated_at);

    // Once past prepared, reaching back to it is forbidden by adjacency.
    request.apply_transition(&admin(RequestStatus::Contacted), &clock)?;
    let reach_back = request.apply_transition(&admin(RequestStatus::Prepared), &clock);
    ensure!(
        reach_back
            == Err(RequestDomainError::InvalidStatusTransition {
                from: RequestStatus::Contacted,
                to: RequestStatus::Prepared,
            })
    );
    ensure!(request.document_generated_at() == generated_at);
    Ok(())
}

#[rstest]
fn malformed_asset_tag_is_rejected_without_mutation(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Laptop])?;
    let command = admin(RequestStatus::Approved).with_fulfillment(
        FulfillmentUpdate::new()
            .with_serial(DeviceKind::Laptop, "SN2")
            .with_asset_tag(DeviceKind::Laptop, "X12345"),
    );

    let result = request.apply_transition(&command, &clock);

    ensure!(
        result
            == Err(RequestDomainError::Validation(
                RequestValidationError::MalformedAssetTag {
                    device: DeviceKind::Laptop,
                    value: "X12345".to_owned(),
                }
            ))
    );
    ensure!(request.status() == RequestStatus::Pending);
    ensure!(request.device_serials().is_empty());
    ensure!(request.device_asset_tags().is_empty());
    Ok(())
}

#[rstest]
fn identifier_for_unselected_device_is_rejected(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Stylus])?;
    let command = admin(RequestStatus::Approved)
        .with_fulfillment(FulfillmentUpdate::new().with_serial(DeviceKind::Laptop, "SN3"));

    let result = request.apply_transition(&command, &clock);

    ensure!(
        result
            == Err(RequestDomainError::Validation(
                RequestValidationError::UnknownDevice {
                    device: DeviceKind::Laptop,
                }
            ))
    );
    Ok(())
}

#[rstest]
fn unrelated_update_preserves_recorded_serial(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Tablet])?;
    request.apply_transition(
        &admin(RequestStatus::Approved)
            .with_fulfillment(FulfillmentUpdate::new().with_serial(DeviceKind::Tablet, "SN1")),
        &clock,
    )?;

    // Preparation supplies only the asset tag; the serial must survive.
    request.apply_transition(
        &admin(RequestStatus::Prepared).with_fulfillment(
            FulfillmentUpdate::new().with_asset_tag(DeviceKind::Tablet, "H00007"),
        ),
        &clock,
    )?;

    ensure!(request.device_serials().get(&DeviceKind::Tablet).map(String::as_str) == Some("SN1"));
    ensure!(
        request
            .device_asset_tags()
            .get(&DeviceKind::Tablet)
            .map(|tag| tag.as_str())
            == Some("H00007")
    );
    Ok(())
}

#[rstest]
fn supplied_serial_overwrites_previous_value(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Laptop])?;
    request.apply_transition(
        &admin(RequestStatus::Approved)
            .with_fulfillment(FulfillmentUpdate::new().with_serial(DeviceKind::Laptop, "SN1")),
        &clock,
    )?;

    request.apply_transition(
        &admin(RequestStatus::Prepared)
            .with_fulfillment(FulfillmentUpdate::new().with_serial(DeviceKind::Laptop, "SN2")),
        &clock,
    )?;

    ensure!(request.device_serials().get(&DeviceKind::Laptop).map(String::as_str) == Some("SN2"));
    Ok(())
}

#[rstest]
fn notes_only_update_is_allowed_on_terminal_status(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Stylus])?;
    request.apply_transition(&admin(RequestStatus::Refused), &clock)?;

    let effects = request.apply_transition(
        &admin(RequestStatus::Refused).with_admin_notes("duplicate of an earlier request"),
        &clock,
    )?;

    ensure!(effects.previous_status == RequestStatus::Refused);
    ensure!(request.status() == RequestStatus::Refused);
    ensure!(request.admin_notes() == "duplicate of an earlier request");
    Ok(())
}

#[rstest]
fn notes_only_update_still_validates_supplied_tags(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Tablet])?;
    let command = admin(RequestStatus::Pending)
        .with_fulfillment(FulfillmentUpdate::new().with_asset_tag(DeviceKind::Tablet, "H12"))
        .with_admin_notes("checking stock");

    let result = request.apply_transition(&command, &clock);

    ensure!(result.is_err());
    ensure!(request.admin_notes().is_empty());
    Ok(())
}

#[rstest]
fn notes_overwrite_even_with_empty_string(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Stylus])?;
    request.apply_transition(
        &admin(RequestStatus::Approved).with_admin_notes("pick up after class"),
        &clock,
    )?;

    request.apply_transition(
        &admin(RequestStatus::Approved).with_admin_notes(""),
        &clock,
    )?;

    ensure!(request.admin_notes().is_empty());
    Ok(())
}

#[rstest]
fn committed_transition_bumps_version(clock: DefaultClock) -> eyre::Result<()> {
    let mut request = submitted(&[DeviceKind::Stylus])?;
    ensure!(request.version() == 0);

    request.apply_transition(&admin(RequestStatus::Approved), &clock)?;
    ensure!(request.version() == 1);

    let failed = request.apply_transition(&admin(RequestStatus::Completed), &clock);
    ensure!(failed.is_err());
    ensure!(request.version() == 1);
    Ok(())
}
