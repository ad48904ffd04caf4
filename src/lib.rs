//! GroundCheck tester firmware library.
//!
//! Exposes the measurement core and drivers for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod measurement;
pub mod physics;
pub mod pins;
pub mod policy;

pub mod adapters;
pub mod drivers;
pub mod sensors;
