//! EnvNode Firmware — Main Entry Point
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  BoardAdapter                          LogEventSink      │
//! │  (Sensor+Input+Display+Serial+Buzzer)  (EventSink)       │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            HubService (pure logic)             │      │
//! │  │  modes · alarm · measurement cycle · frames    │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  UART RX thread · 1 Hz + control timers · event queue    │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use envnode::adapters::board::BoardAdapter;
use envnode::adapters::log_sink::LogEventSink;
use envnode::app::service::HubService;
use envnode::clock::WallClock;
use envnode::config::SystemConfig;
use envnode::events::{Event, drain_events};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("EnvNode v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();

    // ── 3. Construct adapters and the service ─────────────────
    let mut hw = BoardAdapter::new(&config)?;
    let mut sink = LogEventSink::new();
    let clock = WallClock::new();
    let mut service = HubService::new(config);

    service.start(&mut hw, &mut sink);
    info!("system ready, entering event loop");

    // ── 4. Event loop ─────────────────────────────────────────
    //
    // All work is driven by the queue: the UART receive thread signals
    // completed lines, the timers signal wall-clock seconds and control
    // ticks. Between bursts the main task just sleeps.
    loop {
        drain_events(|event| match event {
            Event::LineReady => {
                while let Some(line) = hw.take_line() {
                    match core::str::from_utf8(&line) {
                        Ok(text) => service.handle_line(text, &clock, &mut sink),
                        Err(_) => warn!("dropping non-UTF8 inbound line"),
                    }
                }
            }
            Event::SecondTick => {
                clock.tick_second();
                service.on_second(&mut hw, &mut sink);
            }
            Event::ControlTick => {
                service.tick(&mut hw, &clock, &mut sink);
            }
        });

        esp_idf_hal::delay::FreeRtos::delay_ms(10);
    }
}
