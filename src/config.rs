//! System configuration parameters
//!
//! All tunable timings and counts for the sensor node. Values mirror the
//! deployed hardware defaults; adapters may override at boot.

use serde::{Deserialize, Serialize};

/// Node name used in the startup serial line (`"<node> Porneste\r\n"`).
pub const NODE_NAME: &str = "ENVNODE";

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Buttons ---
    /// Busy-wait after a detected press (milliseconds)
    pub debounce_ms: u32,

    // --- Alarm ---
    /// Countdown armed on the first alarm press (seconds)
    pub alarm_initial_secs: u32,
    /// Added per alarm press while the countdown runs (seconds)
    pub alarm_extend_secs: u32,
    /// Buzzer pulse length when the countdown expires (milliseconds)
    pub buzzer_pulse_ms: u32,

    // --- Digital sensor (SHT21) ---
    /// Settle time after a no-hold temperature command (milliseconds)
    pub sht_temp_settle_ms: u32,
    /// Settle time after a no-hold humidity command (milliseconds)
    pub sht_humid_settle_ms: u32,
    /// Read attempts before giving up on a measurement
    pub sht_read_retries: u8,
    /// Backoff between read attempts (milliseconds)
    pub sht_retry_backoff_ms: u32,

    // --- Two-wire bus ---
    /// Settle delay after each bus line transition (microseconds)
    pub bus_bit_delay_us: u32,

    // --- Serial link ---
    /// Emit the outbound sensor frame every Nth loop iteration
    pub frame_interval_loops: u8,

    // --- Timing ---
    /// Main loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 20,

            alarm_initial_secs: 15,
            alarm_extend_secs: 15,
            buzzer_pulse_ms: 1000,

            sht_temp_settle_ms: 100,
            sht_humid_settle_ms: 50,
            sht_read_retries: 3,
            sht_retry_backoff_ms: 10,

            bus_bit_delay_us: 5,

            frame_interval_loops: 5,

            control_loop_interval_ms: 1000, // 1 Hz
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.debounce_ms > 0);
        assert!(c.alarm_initial_secs > 0);
        assert!(c.alarm_extend_secs > 0);
        assert!(c.sht_read_retries > 0);
        assert!(c.frame_interval_loops > 0);
        assert!(c.control_loop_interval_ms > 0);
    }

    #[test]
    fn temperature_settle_exceeds_humidity_settle() {
        // The SHT21 needs longer for a temperature conversion than for
        // a humidity conversion; swapping these truncates measurements.
        let c = SystemConfig::default();
        assert!(c.sht_temp_settle_ms > c.sht_humid_settle_ms);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.debounce_ms, c2.debounce_ms);
        assert_eq!(c.alarm_initial_secs, c2.alarm_initial_secs);
        assert_eq!(c.frame_interval_loops, c2.frame_interval_loops);
    }
}
