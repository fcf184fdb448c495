//! Hub service — the hexagonal core.
//!
//! [`HubService`] owns the display mode, the alarm countdown, and the
//! button edge state.  It exposes a clean, hardware-agnostic API.  All
//! I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌────────────────────────┐ ──▶ SerialPort
//!    InputPort ──▶ │       HubService        │ ──▶ DisplayPort
//!                  │  mode · alarm · frames  │ ──▶ BuzzerPort
//!                  └────────────────────────┘ ──▶ EventSink
//! ```
//!
//! The main loop drives three entry points: [`tick`](HubService::tick)
//! once per control interval, [`on_second`](HubService::on_second) from
//! the 1 Hz timer event, and [`handle_line`](HubService::handle_line)
//! whenever the serial ISR completes an inbound line.

use log::{debug, info, warn};

use crate::alarm::{AlarmPress, AlarmState, AlarmTick};
use crate::clock::WallClock;
use crate::config::SystemConfig;
use crate::drivers::analog::{self, AnalogChannel};
use crate::drivers::button::{ButtonId, Debouncer};
use crate::drivers::sht21::{self, MeasureKind};
use crate::error::Error;
use crate::link::{ALARM_END_LINE, Reading, SensorFrame, parse_time, startup_line};

use super::events::AppEvent;
use super::ports::{DisplayLine, EventSink, HubHardware};
use super::render::{self, ScreenText};

// ───────────────────────────────────────────────────────────────
// Display modes
// ───────────────────────────────────────────────────────────────

/// What the 16x2 display is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Post-boot menu hint, shown until a mode button is pressed.
    Welcome,
    /// LM35 temperature and HIH humidity.
    AnalogSensors,
    /// SHT21 temperature and humidity.
    DigitalSensor,
    /// Ambient light percentage.
    Light,
    /// Wall-clock time.
    Time,
}

const MODE_BUTTONS: [(ButtonId, DisplayMode); 4] = [
    (ButtonId::AnalogView, DisplayMode::AnalogSensors),
    (ButtonId::DigitalView, DisplayMode::DigitalSensor),
    (ButtonId::LightView, DisplayMode::Light),
    (ButtonId::TimeView, DisplayMode::Time),
];

// ───────────────────────────────────────────────────────────────
// HubService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct HubService {
    config: SystemConfig,
    mode: DisplayMode,
    alarm: AlarmState,
    buttons: Debouncer,
    loop_count: u32,
}

impl HubService {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            mode: DisplayMode::Welcome,
            alarm: AlarmState::new(),
            buttons: Debouncer::new(),
            loop_count: 0,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the node to the gateway and bring up the display.
    pub fn start(&mut self, hw: &mut impl HubHardware, sink: &mut impl EventSink) {
        hw.send(startup_line().as_str());
        self.show(hw, render::ready());
        sink.emit(&AppEvent::Started);
        info!("hub service started");
    }

    // ── Inbound line handling ─────────────────────────────────

    /// Process one completed line from the gateway.
    ///
    /// `TIME:HH:MM:SS` syncs the clock; every other line is discarded.
    pub fn handle_line(&mut self, line: &str, clock: &WallClock, sink: &mut impl EventSink) {
        match parse_time(line) {
            Some(hms) => {
                if clock.set_hms(&hms) {
                    sink.emit(&AppEvent::TimeSynced);
                    info!("clock synced to {}", clock.snapshot().as_str());
                } else {
                    warn!("rejecting malformed TIME payload");
                }
            }
            None => debug!("discarding unrecognized line ({} bytes)", line.len()),
        }
    }

    // ── 1 Hz timer event ──────────────────────────────────────

    /// Advance the alarm countdown by one second of wall time.
    pub fn on_second(&mut self, hw: &mut impl HubHardware, sink: &mut impl EventSink) {
        match self.alarm.second_tick() {
            AlarmTick::Expired => {
                hw.pulse_ms(self.config.buzzer_pulse_ms);
                hw.send(ALARM_END_LINE);
                sink.emit(&AppEvent::AlarmEnded);
                info!("alarm expired");
            }
            AlarmTick::Running(secs) => debug!("alarm running, {secs}s left"),
            AlarmTick::Inactive => {}
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: buttons → measurements → frame →
    /// display.  While the alarm is active it pre-empts everything but
    /// its own button.
    pub fn tick(
        &mut self,
        hw: &mut impl HubHardware,
        clock: &WallClock,
        sink: &mut impl EventSink,
    ) {
        self.poll_alarm_button(hw, sink);

        if self.alarm.is_active() {
            let screen = render::alarm(self.alarm.remaining_secs());
            self.show(hw, screen);
            return;
        }

        self.poll_mode_buttons(hw, sink);

        let frame = self.measure(hw, sink);

        self.loop_count = self.loop_count.wrapping_add(1);
        if self.loop_count % u32::from(self.config.frame_interval_loops) == 0 {
            hw.send(frame.to_line().as_str());
            sink.emit(&AppEvent::FrameSent(frame));
        }

        let screen = match self.mode {
            DisplayMode::Welcome => render::welcome(),
            DisplayMode::AnalogSensors => render::analog(&frame),
            DisplayMode::DigitalSensor => render::digital(&frame),
            DisplayMode::Light => render::light(&frame),
            DisplayMode::Time => render::time(&clock.snapshot()),
        };
        self.show(hw, screen);
    }

    // ── Internals ─────────────────────────────────────────────

    /// Edge-detect one button. The settle wait after the edge only
    /// rides out contact bounce; the press already counted, so a tap
    /// released during the wait still registers.
    fn pressed(&mut self, hw: &mut impl HubHardware, id: ButtonId) -> bool {
        let level_high = !hw.button_is_pressed(id);
        if self.buttons.update(id, level_high) {
            hw.debounce_wait();
            return true;
        }
        false
    }

    fn poll_alarm_button(&mut self, hw: &mut impl HubHardware, sink: &mut impl EventSink) {
        if !self.pressed(hw, ButtonId::Alarm) {
            return;
        }
        match self
            .alarm
            .press(self.config.alarm_initial_secs, self.config.alarm_extend_secs)
        {
            AlarmPress::Armed(secs) => {
                sink.emit(&AppEvent::AlarmArmed { secs });
                info!("alarm armed for {secs}s");
            }
            AlarmPress::Extended(secs) => {
                sink.emit(&AppEvent::AlarmExtended { secs });
                info!("alarm extended to {secs}s");
            }
        }
    }

    fn poll_mode_buttons(&mut self, hw: &mut impl HubHardware, sink: &mut impl EventSink) {
        for (id, mode) in MODE_BUTTONS {
            if self.pressed(hw, id) && self.mode != mode {
                let from = self.mode;
                self.mode = mode;
                hw.clear();
                sink.emit(&AppEvent::ModeChanged { from, to: mode });
                info!("display mode {from:?} -> {mode:?}");
            }
        }
    }

    /// One measurement cycle across all five channels.
    ///
    /// The analog channels cannot fail.  The digital sensor measures
    /// temperature first; when that fails the humidity transaction is
    /// not attempted and both digital channels report invalid.
    fn measure(&mut self, hw: &mut impl HubHardware, sink: &mut impl EventSink) -> SensorFrame {
        let analog_temp = Reading::ok(analog::lm35_celsius(
            hw.sample_analog(AnalogChannel::Lm35Temperature),
        ));
        let analog_humidity = Reading::ok(analog::hih_humidity_percent(
            hw.sample_analog(AnalogChannel::HihHumidity),
        ));
        let light = Reading::ok(analog::light_percent(hw.sample_analog(AnalogChannel::Light)));

        let (digital_temp, digital_humidity) = match hw.measure_digital(MeasureKind::Temperature) {
            Ok(raw) => {
                let temp = Reading::ok(sht21::temperature_celsius(raw));
                match hw.measure_digital(MeasureKind::Humidity) {
                    Ok(raw) => (temp, Reading::ok(sht21::humidity_percent(raw))),
                    Err(err) => {
                        warn!("digital humidity failed: {}", Error::from(err));
                        sink.emit(&AppEvent::DigitalSensorError(err));
                        (temp, Reading::invalid())
                    }
                }
            }
            Err(err) => {
                warn!("digital temperature failed: {}", Error::from(err));
                sink.emit(&AppEvent::DigitalSensorError(err));
                (Reading::invalid(), Reading::invalid())
            }
        };

        SensorFrame {
            analog_temp,
            analog_humidity,
            light,
            digital_temp,
            digital_humidity,
        }
    }

    fn show(&mut self, hw: &mut impl HubHardware, screen: ScreenText) {
        hw.write_line(DisplayLine::Top, screen.top.as_str());
        hw.write_line(DisplayLine::Bottom, screen.bottom.as_str());
    }
}
