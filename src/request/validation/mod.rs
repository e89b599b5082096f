//! Validation rules for loan-request creation and transitions.
//!
//! Rules are pure functions with no side effects; the lifecycle engine
//! runs every applicable rule before mutating anything, so a failed
//! transition leaves the request exactly as it was.

pub mod rules;

pub use rules::{
    asset_tag_well_formed, check_application_requirements, check_asset_tag, check_beneficiary,
    check_device_set, check_serial_recorded, serial_number_required,
};
