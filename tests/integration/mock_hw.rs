//! Mock hardware adapter for integration tests.
//!
//! Records every output-side call so tests can assert on the full
//! history without touching real GPIO/ADC/UART, and lets tests script
//! the input side (ADC counts, digital sensor results, button levels).

use envnode::app::events::AppEvent;
use envnode::app::ports::{
    BuzzerPort, DisplayLine, DisplayPort, EventSink, InputPort, SensorPort, SerialPort,
};
use envnode::drivers::analog::AnalogChannel;
use envnode::drivers::button::ButtonId;
use envnode::drivers::sht21::MeasureKind;
use envnode::error::BusError;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    // Scripted inputs
    pub lm35_raw: u16,
    pub hih_raw: u16,
    pub ldr_raw: u16,
    pub temp_result: Result<u16, BusError>,
    pub humid_result: Result<u16, BusError>,
    pub pressed: [bool; ButtonId::COUNT],
    /// When set, buttons release during the debounce settle wait,
    /// simulating a tap shorter than the settle interval.
    pub release_on_wait: bool,

    // Recorded outputs
    pub sent: Vec<String>,
    pub screen: [String; 2],
    pub clears: u32,
    pub buzzer_pulses: Vec<u32>,
    pub debounce_waits: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            // Raw counts for a comfortable room: ~24.9C, ~55%, bright.
            lm35_raw: 51,
            hih_raw: 512,
            ldr_raw: 900,
            temp_result: Ok(0x6640), // ~23.3C
            humid_result: Ok(0x7C80), // ~54.7%
            pressed: [false; ButtonId::COUNT],
            release_on_wait: false,

            sent: Vec::new(),
            screen: [String::new(), String::new()],
            clears: 0,
            buzzer_pulses: Vec::new(),
            debounce_waits: 0,
        }
    }

    pub fn press(&mut self, id: ButtonId) {
        self.pressed[id.index()] = true;
    }

    pub fn release(&mut self, id: ButtonId) {
        self.pressed[id.index()] = false;
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.sent.last().map(String::as_str)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn sample_analog(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::Lm35Temperature => self.lm35_raw,
            AnalogChannel::HihHumidity => self.hih_raw,
            AnalogChannel::Light => self.ldr_raw,
        }
    }

    fn measure_digital(&mut self, kind: MeasureKind) -> Result<u16, BusError> {
        match kind {
            MeasureKind::Temperature => self.temp_result,
            MeasureKind::Humidity => self.humid_result,
        }
    }
}

impl InputPort for MockHardware {
    fn button_is_pressed(&mut self, id: ButtonId) -> bool {
        self.pressed[id.index()]
    }

    fn debounce_wait(&mut self) {
        self.debounce_waits += 1;
        if self.release_on_wait {
            self.pressed = [false; ButtonId::COUNT];
        }
    }
}

impl DisplayPort for MockHardware {
    fn clear(&mut self) {
        self.clears += 1;
        self.screen = [String::new(), String::new()];
    }

    fn write_line(&mut self, line: DisplayLine, text: &str) {
        let row = match line {
            DisplayLine::Top => 0,
            DisplayLine::Bottom => 1,
        };
        self.screen[row] = text.to_string();
    }
}

impl SerialPort for MockHardware {
    fn send(&mut self, text: &str) {
        self.sent.push(text.to_string());
    }
}

impl BuzzerPort for MockHardware {
    fn pulse_ms(&mut self, ms: u32) {
        self.buzzer_pulses.push(ms);
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
