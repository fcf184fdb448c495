//! Integration test harness.
//!
//! Drives the full `HubService` against mock port implementations —
//! no hardware, no ESP-IDF. Each scenario module covers one slice of
//! the node's observable behavior.

mod hub_service_tests;
mod mock_hw;
