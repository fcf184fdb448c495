//! Host-testable protocol drivers: the bit-banged two-wire bus master,
//! the SHT21 measurement driver built on it, analog channel conversions,
//! the button edge debouncer, and the HD44780 display driver.

pub mod analog;
pub mod bus;
pub mod button;
pub mod lcd;
pub mod sht21;
