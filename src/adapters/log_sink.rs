//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production, the test harness on the
//! host).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | node announced"),
            AppEvent::ModeChanged { from, to } => info!("MODE  | {:?} -> {:?}", from, to),
            AppEvent::AlarmArmed { secs } => info!("ALARM | armed, {}s", secs),
            AppEvent::AlarmExtended { secs } => info!("ALARM | extended, {}s", secs),
            AppEvent::AlarmEnded => info!("ALARM | ended"),
            AppEvent::TimeSynced => info!("CLOCK | synced from gateway"),
            AppEvent::FrameSent(frame) => {
                info!(
                    "FRAME | T1={:.1} H1={:.0} L={:.0} T2={} H2={}",
                    frame.analog_temp.value,
                    frame.analog_humidity.value,
                    frame.light.value,
                    fmt_reading(frame.digital_temp.valid, frame.digital_temp.value, 1),
                    fmt_reading(frame.digital_humidity.valid, frame.digital_humidity.value, 0),
                );
            }
            AppEvent::DigitalSensorError(err) => info!("SHT21 | error: {}", err),
        }
    }
}

fn fmt_reading(valid: bool, value: f32, decimals: usize) -> heapless::String<12> {
    use core::fmt::Write as _;
    let mut s = heapless::String::new();
    if valid {
        let _ = write!(s, "{:.*}", decimals, value);
    } else {
        let _ = s.push_str("ERR");
    }
    s
}
