//! EnvNode firmware library.
//!
//! Two-node environmental sensor hub: this crate is the sensor node. It
//! samples three analog channels and an SHT21 over a bit-banged two-wire
//! bus, drives a 16x2 character display, runs a countdown alarm, and
//! exchanges a line-oriented ASCII protocol with the gateway over UART.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod clock;
pub mod config;
pub mod drivers;
pub mod events;
pub mod link;

pub mod error;
mod pins;

// Re-export the ESP-IDF-only adapters so the crate compiles on the host;
// the hardware implementations are guarded by cfg attributes inside.
pub mod adapters;
