//! Loaner-device request lifecycle.
//!
//! This module implements the request lifecycle engine: submitting a
//! request into the `pending` status, moving it through the fixed
//! approval/fulfillment workflow, recording per-device serial numbers and
//! asset tags along the way, and instructing the outer layer to generate
//! the official loan document when fulfillment begins. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Validation rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
