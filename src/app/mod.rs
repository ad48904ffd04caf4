//! Application core — pure domain logic, zero I/O.
//!
//! The measurement cycle for the GroundCheck tester: sampling, derived
//! quantities, alarm policy and display layout.  All interaction with
//! hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
