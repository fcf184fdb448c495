//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                      | Connects to            |
//! |------------|---------------------------------|------------------------|
//! | `board`    | SensorPort, InputPort,          | ESP32 ADC, GPIO, UART, |
//! |            | DisplayPort, SerialPort,        | HD44780, timers        |
//! |            | BuzzerPort                      |                        |
//! | `log_sink` | EventSink                       | Serial log output      |

#[cfg(target_os = "espidf")]
pub mod board;
pub mod log_sink;
