//! GPIO / peripheral pin assignments for the EnvNode sensor board.
//!
//! Single source of truth — every adapter references this module rather
//! than hard-coding pin numbers. Change a pin here and it propagates
//! everywhere.

#![allow(dead_code)] // referenced only by the espidf adapter on host builds

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// LM35 temperature sensor — 10 mV/°C linear output.
pub const LM35_ADC_GPIO: i32 = 1;
/// HIH-5030 humidity sensor — ratiometric voltage output.
pub const HIH_ADC_GPIO: i32 = 2;
/// LDR light divider — lower voltage means brighter.
pub const LDR_ADC_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// SHT21 two-wire bus (bit-banged; no hardware I2C peripheral used)
// ---------------------------------------------------------------------------

/// Open-drain data line with external pull-up.
pub const SHT_SDA_GPIO: i32 = 14;
/// Clock line, driven push-pull by the master.
pub const SHT_SCL_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Buttons (active-low with external pull-ups)
// ---------------------------------------------------------------------------

/// Alarm arm/extend button.
pub const BUTTON_ALARM_GPIO: i32 = 4;
/// Analog-sensors display mode.
pub const BUTTON_ANALOG_GPIO: i32 = 5;
/// Digital-sensor display mode.
pub const BUTTON_DIGITAL_GPIO: i32 = 6;
/// Light-level display mode.
pub const BUTTON_LIGHT_GPIO: i32 = 7;
/// Clock display mode.
pub const BUTTON_TIME_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Buzzer
// ---------------------------------------------------------------------------

/// Digital output, active HIGH. Pulsed when the alarm countdown expires.
pub const BUZZER_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// 16x2 character display (HD44780, 4-bit parallel)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 10;
pub const LCD_EN_GPIO: i32 = 11;
pub const LCD_D4_GPIO: i32 = 12;
pub const LCD_D5_GPIO: i32 = 13;
pub const LCD_D6_GPIO: i32 = 16;
pub const LCD_D7_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// UART link to the gateway node
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Line rate agreed with the gateway.
pub const UART_BAUD: u32 = 9600;
