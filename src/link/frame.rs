//! ASCII frame codec for the gateway link.
//!
//! Outbound frames carry the five channels as labeled fields:
//!
//! ```text
//! T1:23.4,H1:56,L:78,T2:24.1,H2:53\r\n
//! ```
//!
//! Temperatures keep one decimal, percentages are whole numbers, and a
//! failed channel serializes as `ERR` in place of its value. Inbound,
//! the only structured line is `TIME:HH:MM:SS`; anything else is
//! discarded by the service.

use core::fmt::Write as _;

use heapless::String;

use crate::config::NODE_NAME;

/// Longest outbound line including the terminator.
pub const FRAME_MAX: usize = 64;

/// Sent once when the alarm countdown expires.
pub const ALARM_END_LINE: &str = "alarm_end\r\n";

/// One channel value; `value` is meaningful only while `valid`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f32,
    pub valid: bool,
}

impl Reading {
    pub const fn ok(value: f32) -> Self {
        Self { value, valid: true }
    }

    pub const fn invalid() -> Self {
        Self {
            value: 0.0,
            valid: false,
        }
    }
}

/// One measurement cycle across all five channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame {
    pub analog_temp: Reading,
    pub analog_humidity: Reading,
    pub light: Reading,
    pub digital_temp: Reading,
    pub digital_humidity: Reading,
}

impl SensorFrame {
    /// Serialize to the wire line, terminator included.
    pub fn to_line(&self) -> String<FRAME_MAX> {
        let mut out = String::new();
        // Worst-case field widths fit FRAME_MAX, so formatting cannot
        // overflow; a capacity error would only truncate the line.
        let _ = fmt_field(&mut out, "T1:", self.analog_temp, 1);
        let _ = out.push(',');
        let _ = fmt_field(&mut out, "H1:", self.analog_humidity, 0);
        let _ = out.push(',');
        let _ = fmt_field(&mut out, "L:", self.light, 0);
        let _ = out.push(',');
        let _ = fmt_field(&mut out, "T2:", self.digital_temp, 1);
        let _ = out.push(',');
        let _ = fmt_field(&mut out, "H2:", self.digital_humidity, 0);
        let _ = out.push_str("\r\n");
        out
    }
}

fn fmt_field(
    out: &mut String<FRAME_MAX>,
    label: &str,
    reading: Reading,
    decimals: usize,
) -> core::fmt::Result {
    out.push_str(label).map_err(|()| core::fmt::Error)?;
    if reading.valid {
        write!(out, "{:.*}", decimals, reading.value)
    } else {
        out.push_str("ERR").map_err(|()| core::fmt::Error)
    }
}

/// Announced once at power-up so the gateway knows the node restarted.
pub fn startup_line() -> String<FRAME_MAX> {
    let mut out = String::new();
    let _ = write!(out, "{NODE_NAME} Porneste\r\n");
    out
}

/// Reference parser for the outbound frame format (gateway side and
/// round-trip tests). Accepts lines with or without the terminator.
pub fn parse_frame(line: &str) -> Option<SensorFrame> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = line.split(',');

    let analog_temp = parse_field(fields.next()?, "T1:")?;
    let analog_humidity = parse_field(fields.next()?, "H1:")?;
    let light = parse_field(fields.next()?, "L:")?;
    let digital_temp = parse_field(fields.next()?, "T2:")?;
    let digital_humidity = parse_field(fields.next()?, "H2:")?;
    if fields.next().is_some() {
        return None;
    }

    Some(SensorFrame {
        analog_temp,
        analog_humidity,
        light,
        digital_temp,
        digital_humidity,
    })
}

fn parse_field(field: &str, label: &str) -> Option<Reading> {
    let value = field.strip_prefix(label)?;
    if value == "ERR" {
        Some(Reading::invalid())
    } else {
        value.parse::<f32>().ok().map(Reading::ok)
    }
}

/// Extract the `HH:MM:SS` payload of a `TIME:` line.
///
/// The gateway appends fields after the time (`TIME:HH:MM:SS,DATE:…`),
/// so only the 8 bytes following the marker are taken; anything before
/// or after is ignored. Shape validation (digits and colons) is the
/// clock's job.
pub fn parse_time(line: &str) -> Option<[u8; 8]> {
    let at = line.find("TIME:")?;
    let payload = line.as_bytes().get(at + 5..at + 13)?;
    payload.try_into().ok()
}
