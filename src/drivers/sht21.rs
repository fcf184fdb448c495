//! SHT21 humidity/temperature sensor driver.
//!
//! Measurement protocol over the bit-banged [`BusMaster`]: address the
//! device for write, send the no-hold measurement command, release the
//! bus for the conversion settle time, then poll for the result with a
//! bounded number of read attempts. Each successful read clocks three
//! bytes — MSB, LSB, and a checksum byte that is read to complete the
//! transaction but not validated.
//!
//! Raw-to-physical conversions follow the datasheet:
//! `T = -46.85 + 175.72 * raw / 2^16`, `RH = -6.0 + 125.0 * raw / 2^16`.

use log::debug;

use crate::config::SystemConfig;
use crate::drivers::bus::{BusLines, BusMaster};
use crate::error::BusError;

/// Fixed 7-bit bus address of the sensor.
pub const SHT21_ADDR: u8 = 0x40;

const ADDR_WRITE: u8 = SHT21_ADDR << 1;
const ADDR_READ: u8 = (SHT21_ADDR << 1) | 0x01;

const CMD_MEASURE_TEMP_NO_HOLD: u8 = 0xF3;
const CMD_MEASURE_HUMID_NO_HOLD: u8 = 0xF5;
const CMD_SOFT_RESET: u8 = 0xFE;

/// Wait after a soft reset before the sensor accepts commands.
const SOFT_RESET_SETTLE_MS: u32 = 15;

/// The low 2 bits of a raw reading carry status, not measurement data.
const STATUS_BITS_MASK: u16 = 0x0003;

/// Which quantity to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    Temperature,
    Humidity,
}

/// Timing knobs for the measurement protocol, lifted out of
/// [`SystemConfig`] so the driver does not drag the whole config around.
#[derive(Debug, Clone, Copy)]
pub struct Sht21Timing {
    /// Conversion settle after a temperature command (milliseconds).
    pub temp_settle_ms: u32,
    /// Conversion settle after a humidity command (milliseconds).
    pub humid_settle_ms: u32,
    /// Read attempts before the measurement is abandoned.
    pub read_retries: u8,
    /// Backoff between read attempts (milliseconds).
    pub retry_backoff_ms: u32,
}

impl From<&SystemConfig> for Sht21Timing {
    fn from(cfg: &SystemConfig) -> Self {
        Self {
            temp_settle_ms: cfg.sht_temp_settle_ms,
            humid_settle_ms: cfg.sht_humid_settle_ms,
            read_retries: cfg.sht_read_retries,
            retry_backoff_ms: cfg.sht_retry_backoff_ms,
        }
    }
}

impl Default for Sht21Timing {
    fn default() -> Self {
        Self::from(&SystemConfig::default())
    }
}

/// SHT21 driver over a two-wire bus master.
pub struct Sht21<L: BusLines> {
    bus: BusMaster<L>,
    timing: Sht21Timing,
}

impl<L: BusLines> Sht21<L> {
    pub fn new(lines: L, timing: Sht21Timing) -> Self {
        Self {
            bus: BusMaster::new(lines),
            timing,
        }
    }

    /// Idle the bus and soft-reset the sensor. A sensor that does not
    /// acknowledge here is left alone; the first `measure` will report
    /// the failure properly.
    pub fn init(&mut self) {
        self.bus.init();
        self.bus.start();
        if self.bus.write(ADDR_WRITE) {
            let _ = self.bus.write(CMD_SOFT_RESET);
        }
        self.bus.stop();
        self.bus.delay_ms(SOFT_RESET_SETTLE_MS);
    }

    /// Run one full measurement transaction.
    ///
    /// Returns the raw 16-bit value with the status bits masked off, or
    /// the failure code for the stage that broke down. Never retries the
    /// command phase — only the result read is retried.
    pub fn measure(&mut self, kind: MeasureKind) -> Result<u16, BusError> {
        let (command, settle_ms) = match kind {
            MeasureKind::Temperature => (CMD_MEASURE_TEMP_NO_HOLD, self.timing.temp_settle_ms),
            MeasureKind::Humidity => (CMD_MEASURE_HUMID_NO_HOLD, self.timing.humid_settle_ms),
        };

        self.bus.start();
        if !self.bus.write(ADDR_WRITE) {
            self.bus.stop();
            return Err(BusError::NoAck);
        }
        if !self.bus.write(command) {
            self.bus.stop();
            return Err(BusError::CommandNack);
        }
        self.bus.stop();

        self.bus.delay_ms(settle_ms);

        for attempt in 0..self.timing.read_retries {
            self.bus.start();
            if self.bus.write(ADDR_READ) {
                let msb = self.bus.read(true);
                let lsb = self.bus.read(true);
                let _checksum = self.bus.read(false);
                self.bus.stop();
                return Ok(u16::from_be_bytes([msb, lsb]) & !STATUS_BITS_MASK);
            }
            self.bus.stop();
            debug!("sht21: {kind:?} read attempt {} unacknowledged", attempt + 1);
            self.bus.delay_ms(self.timing.retry_backoff_ms);
        }

        Err(BusError::ReadFailed)
    }
}

// ---------------------------------------------------------------------------
// Conversions (pure)
// ---------------------------------------------------------------------------

/// Raw 16-bit temperature reading to degrees Celsius.
pub fn temperature_celsius(raw: u16) -> f32 {
    -46.85 + 175.72 * f32::from(raw) / 65536.0
}

/// Raw 16-bit humidity reading to relative humidity, clamped to 0–100 %.
pub fn humidity_percent(raw: u16) -> f32 {
    (-6.0 + 125.0 * f32::from(raw) / 65536.0).clamp(0.0, 100.0)
}
