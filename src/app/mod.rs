//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the sensor hub node:
//! mode selection, alarm orchestration, measurement cycles, and frame
//! emission. All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod render;
pub mod service;
