//! Loaner: loaner-device request tracking.
//!
//! This crate provides the core of a system for requesting loaner devices
//! (tablets, laptops, styluses) for a beneficiary and tracking each
//! request through a fixed approval/fulfillment workflow, including the
//! official loan document produced once fulfillment begins.
//!
//! # Architecture
//!
//! Loaner follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, rendering)
//!
//! # Modules
//!
//! - [`request`]: Request lifecycle engine, validation rules, and adapters

pub mod request;
