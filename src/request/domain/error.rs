//! Error types for loan-request domain validation and parsing.

use super::{ActorRole, DeviceKind, RequestStatus};
use thiserror::Error;

/// Errors raised while validating loan-request data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestValidationError {
    /// The request carries no device kinds.
    #[error("a request must select at least one device")]
    EmptyDeviceSet,

    /// A mandatory beneficiary field is blank.
    #[error("beneficiary field '{field}' must not be empty")]
    MissingBeneficiaryField {
        /// Name of the blank field.
        field: &'static str,
    },

    /// The application-requirements text is blank.
    #[error("application requirements must not be empty")]
    EmptyApplicationRequirements,

    /// A tracked device has no recorded serial number at a status that
    /// requires one.
    #[error("serial number required for {device} before entering {target}")]
    MissingSerialNumber {
        /// Device kind lacking a serial number.
        device: DeviceKind,
        /// Status the transition targeted.
        target: RequestStatus,
    },

    /// A supplied asset tag does not follow the `H` + five digits scheme.
    #[error("asset tag '{value}' for {device} must match H followed by five digits")]
    MalformedAssetTag {
        /// Device kind the tag was supplied for.
        device: DeviceKind,
        /// The rejected tag value.
        value: String,
    },

    /// An identifier was supplied for a device kind the request never
    /// selected.
    #[error("{device} is not part of this request's device set")]
    UnknownDevice {
        /// The unselected device kind.
        device: DeviceKind,
    },
}

/// Errors raised by the lifecycle engine while applying a transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestDomainError {
    /// The acting role lacks the administrator capability.
    #[error("role '{role}' is not permitted to transition requests")]
    NotAuthorized {
        /// Role the caller presented.
        role: ActorRole,
    },

    /// The target status is unreachable from the current status.
    #[error("cannot transition request from {from} to {to}")]
    InvalidStatusTransition {
        /// Status the request currently holds.
        from: RequestStatus,
        /// Status the caller attempted to reach.
        to: RequestStatus,
    },

    /// A validation rule rejected the transition or creation payload.
    #[error(transparent)]
    Validation(#[from] RequestValidationError),
}

/// Error returned while parsing workflow statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request status: {0}")]
pub struct ParseRequestStatusError(pub String);

/// Error returned while parsing device kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown device kind: {0}")]
pub struct ParseDeviceKindError(pub String);
