//! 16x2 display rendering.
//!
//! Pure text composition for each display mode; the service hands the
//! result to the [`DisplayPort`](super::ports::DisplayPort). User-facing
//! strings are Romanian, matching the deployed units.

use core::fmt::Write as _;

use heapless::String;

use crate::clock::ClockStamp;
use crate::link::{Reading, SensorFrame};

/// Character columns per display row.
pub const LCD_COLS: usize = 16;

/// Both rows of the display, already clipped to the column count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenText {
    pub top: String<LCD_COLS>,
    pub bottom: String<LCD_COLS>,
}

fn screen(top: &str, bottom: &str) -> ScreenText {
    let mut s = ScreenText {
        top: String::new(),
        bottom: String::new(),
    };
    let _ = s.top.push_str(top);
    let _ = s.bottom.push_str(bottom);
    s
}

/// Display rounding: half-up to the nearest integer.
fn round_whole(value: f32) -> i32 {
    (value + 0.5) as i32
}

/// Shown after power-up until a mode button is pressed.
pub fn welcome() -> ScreenText {
    screen("Apasa un buton", "pentru meniu")
}

/// Shown once at the end of hardware bring-up.
pub fn ready() -> ScreenText {
    screen("Sistem Gata", "")
}

/// Analog temperature and humidity view.
pub fn analog(frame: &SensorFrame) -> ScreenText {
    let mut s = screen("", "");
    let _ = write!(s.top, "LM35 T: {}C", round_whole(frame.analog_temp.value));
    let _ = write!(
        s.bottom,
        "HIH H: {}%",
        round_whole(frame.analog_humidity.value)
    );
    s
}

/// Digital sensor view; a failed channel reads `Eroare`.
pub fn digital(frame: &SensorFrame) -> ScreenText {
    let mut s = screen("", "");
    match frame.digital_temp {
        Reading { value, valid: true } => {
            let _ = write!(s.top, "SHT21 T: {value:.1}C");
        }
        _ => {
            let _ = s.top.push_str("SHT21 T: Eroare");
        }
    }
    match frame.digital_humidity {
        Reading { value, valid: true } => {
            let _ = write!(s.bottom, "SHT21 H: {}%", round_whole(value));
        }
        _ => {
            let _ = s.bottom.push_str("SHT21 H: Eroare");
        }
    }
    s
}

/// Ambient light view.
pub fn light(frame: &SensorFrame) -> ScreenText {
    let mut s = screen("Nivel Lumina:", "");
    let _ = write!(s.bottom, "{}%", round_whole(frame.light.value));
    s
}

/// Clock view.
pub fn time(stamp: &ClockStamp) -> ScreenText {
    screen("Timpul Curent:", stamp.as_str())
}

/// Alarm countdown view, shown while the alarm pre-empts every mode.
/// The remaining time reads as zero-padded `MM:SS`.
pub fn alarm(remaining_secs: u32) -> ScreenText {
    let mut s = screen("", "+ Apasa pt 15s");
    let _ = write!(
        s.top,
        "Alarma: {:02}:{:02}",
        remaining_secs / 60,
        remaining_secs % 60
    );
    s
}
