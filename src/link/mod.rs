//! Serial link layer: the interrupt-fed line assembler and the ASCII
//! frame codec spoken with the gateway node.

pub mod frame;
pub mod line;

pub use frame::{ALARM_END_LINE, Reading, SensorFrame, parse_frame, parse_time, startup_line};
pub use line::{LINE_MAX, LineAssembler, LinkStats};
