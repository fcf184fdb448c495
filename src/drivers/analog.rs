//! Analog channel selection and raw-to-physical conversions.
//!
//! Three channels share the 10-bit ADC: an LM35 temperature sensor, an
//! HIH-5030 humidity sensor, and an LDR divider for ambient light. The
//! conversions are pure functions over the raw 0..=1023 counts, assuming
//! a 5.0 V reference.

/// Which ADC channel to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    /// LM35 temperature sensor, 10 mV per degree Celsius.
    Lm35Temperature,
    /// HIH-5030 humidity sensor, ratiometric to the supply.
    HihHumidity,
    /// LDR voltage divider; higher counts mean darker.
    Light,
}

const ADC_FULL_SCALE: f32 = 1024.0;
const VREF: f32 = 5.0;

/// LM35 raw counts to degrees Celsius: 10 mV/°C at a 5 V reference.
pub fn lm35_celsius(raw: u16) -> f32 {
    f32::from(raw) * VREF / ADC_FULL_SCALE * 100.0
}

/// HIH-5030 raw counts to relative humidity, clamped to 0–100 %.
///
/// Datasheet transfer function at 5 V supply:
/// `Vout = Vsupply * (0.00636 * RH + 0.1515)`, solved for RH with the
/// ratiometric supply term cancelled.
pub fn hih_humidity_percent(raw: u16) -> f32 {
    let vout = f32::from(raw) * VREF / ADC_FULL_SCALE;
    ((vout / VREF - 0.1515) / 0.00636).clamp(0.0, 100.0)
}

/// LDR raw counts to a light percentage: 0 % pitch dark, 100 % bright.
///
/// Raw counts are clamped to 1..=1023 before scaling so a floored or
/// saturated ADC still maps onto the percentage range.
pub fn light_percent(raw: u16) -> f32 {
    let clamped = f32::from(raw.clamp(1, 1023));
    100.0 - clamped / 1023.0 * 100.0
}
