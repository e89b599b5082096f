//! Domain model for the loan-request lifecycle.
//!
//! The domain owns the workflow state machine, the fulfillment merge, and
//! the aggregate invariants while keeping every infrastructure concern
//! outside of the domain boundary.

mod actor;
mod asset_tag;
mod beneficiary;
mod device;
mod error;
mod fulfillment;
mod ids;
mod request;
mod status;

pub use actor::ActorRole;
pub use asset_tag::{AssetTag, ParseAssetTagError};
pub use beneficiary::{Beneficiary, ContactDetails, Logistics};
pub use device::DeviceKind;
pub use error::{
    ParseDeviceKindError, ParseRequestStatusError, RequestDomainError, RequestValidationError,
};
pub use fulfillment::FulfillmentUpdate;
pub use ids::{RequestId, RequesterId};
pub use request::{
    LoanRequest, NewLoanRequest, PersistedLoanRequestData, TransitionCommand, TransitionEffects,
};
pub use status::RequestStatus;
