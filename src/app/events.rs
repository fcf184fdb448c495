//! Outbound application events.
//!
//! The [`HubService`](super::service::HubService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to the console, feed a test
//! recorder, etc.

use crate::error::BusError;
use crate::link::SensorFrame;

use super::service::DisplayMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started and announced itself to the gateway.
    Started,

    /// The display switched between modes.
    ModeChanged { from: DisplayMode, to: DisplayMode },

    /// The alarm countdown was armed (carries seconds remaining).
    AlarmArmed { secs: u32 },

    /// A press during an active countdown extended it.
    AlarmExtended { secs: u32 },

    /// The countdown reached zero; buzzer pulsed, gateway notified.
    AlarmEnded,

    /// A gateway `TIME:` line was accepted; the clock is now synced.
    TimeSynced,

    /// A measurement frame was written to the gateway link.
    FrameSent(SensorFrame),

    /// The digital sensor failed mid-cycle.
    DigitalSensorError(BusError),
}
