//! Individual validation rule implementations.
//!
//! Each rule validates one aspect of a request payload and returns
//! `Ok(())` on success or a specific [`RequestValidationError`] naming
//! the offending field or device.

use crate::request::domain::{
    AssetTag, Beneficiary, DeviceKind, RequestStatus, RequestValidationError,
};
use std::collections::BTreeSet;

/// Statuses at which tracked devices must already have a serial recorded.
const SERIAL_ENFORCED_STATUSES: &[RequestStatus] =
    &[RequestStatus::Approved, RequestStatus::Prepared];

/// Returns true when `tag` is empty or matches the physical label scheme
/// (`H` followed by exactly five decimal digits).
#[must_use]
pub fn asset_tag_well_formed(tag: &str) -> bool {
    AssetTag::is_well_formed(tag)
}

/// Returns true when `device` must carry a non-empty serial number before
/// a transition into `target` may commit.
///
/// Styluses are fungible and never require one; tracked kinds require one
/// for the approval and preparation statuses only.
#[must_use]
pub fn serial_number_required(device: DeviceKind, target: RequestStatus) -> bool {
    device.tracks_serial() && SERIAL_ENFORCED_STATUSES.contains(&target)
}

/// Validates a supplied asset-tag value for a device.
///
/// # Errors
///
/// Returns [`RequestValidationError::MalformedAssetTag`] when the value is
/// non-empty and does not follow the label scheme.
pub fn check_asset_tag(device: DeviceKind, tag: &str) -> Result<(), RequestValidationError> {
    if asset_tag_well_formed(tag) {
        return Ok(());
    }
    Err(RequestValidationError::MalformedAssetTag {
        device,
        value: tag.to_owned(),
    })
}

/// Validates that a device's merged serial satisfies the target status.
///
/// `merged_serial` is the value the device would hold after the proposed
/// update is applied over the stored map.
///
/// # Errors
///
/// Returns [`RequestValidationError::MissingSerialNumber`] when a serial
/// is required but blank or absent.
pub fn check_serial_recorded(
    device: DeviceKind,
    merged_serial: Option<&str>,
    target: RequestStatus,
) -> Result<(), RequestValidationError> {
    if !serial_number_required(device, target) {
        return Ok(());
    }
    let recorded = merged_serial.is_some_and(|serial| !serial.trim().is_empty());
    if recorded {
        Ok(())
    } else {
        Err(RequestValidationError::MissingSerialNumber { device, target })
    }
}

/// Validates that the mandatory beneficiary fields are present.
///
/// Enforced once, at creation.
///
/// # Errors
///
/// Returns [`RequestValidationError::MissingBeneficiaryField`] naming the
/// first blank mandatory field.
pub fn check_beneficiary(beneficiary: &Beneficiary) -> Result<(), RequestValidationError> {
    let mandatory = [
        ("last_name", beneficiary.last_name()),
        ("first_name", beneficiary.first_name()),
        ("school", beneficiary.school()),
    ];
    for (field, value) in mandatory {
        if value.trim().is_empty() {
            return Err(RequestValidationError::MissingBeneficiaryField { field });
        }
    }
    Ok(())
}

/// Validates that at least one device kind is selected.
///
/// Enforced once, at creation; the device set is immutable afterwards.
///
/// # Errors
///
/// Returns [`RequestValidationError::EmptyDeviceSet`] for an empty set.
pub fn check_device_set(devices: &BTreeSet<DeviceKind>) -> Result<(), RequestValidationError> {
    if devices.is_empty() {
        return Err(RequestValidationError::EmptyDeviceSet);
    }
    Ok(())
}

/// Validates the mandatory application-requirements text.
///
/// Enforced once, at creation.
///
/// # Errors
///
/// Returns [`RequestValidationError::EmptyApplicationRequirements`] for
/// blank text.
pub fn check_application_requirements(text: &str) -> Result<(), RequestValidationError> {
    if text.trim().is_empty() {
        return Err(RequestValidationError::EmptyApplicationRequirements);
    }
    Ok(())
}
