//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HubService (domain)
//! ```
//!
//! Driven adapters (sensors, buttons, display, serial, buzzer, event
//! sinks) implement these traits.  The
//! [`HubService`](super::service::HubService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::drivers::analog::AnalogChannel;
use crate::drivers::button::ButtonId;
use crate::drivers::sht21::MeasureKind;
use crate::error::BusError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain raw sensor data.
pub trait SensorPort {
    /// One raw 10-bit ADC conversion on the given channel.
    fn sample_analog(&mut self, channel: AnalogChannel) -> u16;

    /// One full digital-sensor measurement transaction.
    fn measure_digital(&mut self, kind: MeasureKind) -> Result<u16, BusError>;
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: buttons → domain)
// ───────────────────────────────────────────────────────────────

/// Button sampling and the contact-settle wait after a detected edge.
pub trait InputPort {
    /// Sample a button level; `true` means pressed (active-low input).
    fn button_is_pressed(&mut self, id: ButtonId) -> bool;

    /// Block for the contact-settle interval after an edge.
    fn debounce_wait(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Output ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Which of the two character-display rows to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLine {
    Top,
    Bottom,
}

/// 16x2 character display.
pub trait DisplayPort {
    fn clear(&mut self);
    fn write_line(&mut self, line: DisplayLine, text: &str);
}

/// Outbound side of the gateway serial link.
pub trait SerialPort {
    /// Write a complete, already-terminated line to the gateway.
    fn send(&mut self, text: &str);
}

/// Alarm buzzer.
pub trait BuzzerPort {
    /// Drive the buzzer for the given duration, blocking.
    fn pulse_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / test recorders)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Everything the service needs from the board in one bound, so a tick
/// takes a single `&mut` borrow of the hardware.
pub trait HubHardware: SensorPort + InputPort + DisplayPort + SerialPort + BuzzerPort {}

impl<T: SensorPort + InputPort + DisplayPort + SerialPort + BuzzerPort> HubHardware for T {}
