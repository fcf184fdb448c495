//! HD44780 character display driver, 4-bit parallel mode.
//!
//! Generic over `embedded-hal` output pins and a delay source, so the
//! nibble sequencing is testable on the host with recording pins. Only
//! the handful of operations the node needs are implemented: init,
//! clear, cursor positioning, and text output.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Character columns per row.
pub const COLS: u8 = 16;
/// Display rows.
pub const ROWS: u8 = 2;

/// DDRAM base address of each row.
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

pub struct Hd44780<RS, EN, D4, D5, D6, D7, DELAY> {
    rs: RS,
    en: EN,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
    delay: DELAY,
}

impl<RS, EN, D4, D5, D6, D7, DELAY> Hd44780<RS, EN, D4, D5, D6, D7, DELAY>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(rs: RS, en: EN, d4: D4, d5: D5, d6: D6, d7: D7, delay: DELAY) -> Self {
        Self {
            rs,
            en,
            d4,
            d5,
            d6,
            d7,
            delay,
        }
    }

    /// Power-on initialization per the datasheet's 4-bit wake sequence.
    pub fn init(&mut self) {
        self.delay.delay_ms(40);

        // Three 8-bit function-set nibbles force a known state, then the
        // fourth switches the interface to 4-bit mode.
        self.write_nibble(0x03, false);
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false);
        self.delay.delay_ms(1);
        self.write_nibble(0x03, false);
        self.delay.delay_ms(1);
        self.write_nibble(0x02, false);
        self.delay.delay_ms(1);

        self.command(CMD_FUNCTION_4BIT_2LINE);
        self.command(CMD_DISPLAY_ON);
        self.command(CMD_ENTRY_MODE_INC);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.command(CMD_CLEAR);
        self.delay.delay_ms(2); // clear is the slow command
    }

    /// Move the cursor; out-of-range coordinates clamp to the display.
    pub fn set_cursor(&mut self, row: u8, col: u8) {
        let row = row.min(ROWS - 1);
        let col = col.min(COLS - 1);
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col));
    }

    /// Write text at the cursor, clipped to the row width. Bytes outside
    /// the printable ASCII range render as `?`.
    pub fn print(&mut self, text: &str) {
        for byte in text.bytes().take(COLS as usize) {
            let glyph = if (0x20..0x7F).contains(&byte) {
                byte
            } else {
                b'?'
            };
            self.data(glyph);
        }
    }

    fn command(&mut self, byte: u8) {
        self.write_nibble(byte >> 4, false);
        self.write_nibble(byte & 0x0F, false);
        self.delay.delay_us(50);
    }

    fn data(&mut self, byte: u8) {
        self.write_nibble(byte >> 4, true);
        self.write_nibble(byte & 0x0F, true);
        self.delay.delay_us(50);
    }

    fn write_nibble(&mut self, nibble: u8, rs_high: bool) {
        set(&mut self.rs, rs_high);
        set(&mut self.d4, nibble & 0x01 != 0);
        set(&mut self.d5, nibble & 0x02 != 0);
        set(&mut self.d6, nibble & 0x04 != 0);
        set(&mut self.d7, nibble & 0x08 != 0);

        // Latch on the falling edge of EN.
        set(&mut self.en, true);
        self.delay.delay_us(1);
        set(&mut self.en, false);
        self.delay.delay_us(1);
    }
}

fn set(pin: &mut impl OutputPin, high: bool) {
    let _ = if high { pin.set_high() } else { pin.set_low() };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Edge {
        pin: &'static str,
        high: bool,
    }

    #[derive(Clone)]
    struct MockPin {
        name: &'static str,
        log: Rc<RefCell<Vec<Edge>>>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Edge {
                pin: self.name,
                high: false,
            });
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Edge {
                pin: self.name,
                high: true,
            });
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type MockLcd = Hd44780<MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, NoDelay>;

    fn mock_lcd() -> (MockLcd, Rc<RefCell<Vec<Edge>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pin = |name| MockPin {
            name,
            log: Rc::clone(&log),
        };
        let lcd = Hd44780::new(
            pin("rs"),
            pin("en"),
            pin("d4"),
            pin("d5"),
            pin("d6"),
            pin("d7"),
            NoDelay,
        );
        (lcd, log)
    }

    /// Replay the edge log and collect `(nibble, rs)` pairs latched on
    /// each EN falling edge.
    fn latched_nibbles(log: &[Edge]) -> Vec<(u8, bool)> {
        let mut levels = std::collections::HashMap::new();
        let mut out = Vec::new();
        for edge in log {
            if edge.pin == "en" && !edge.high {
                let bit = |name| u8::from(*levels.get(name).unwrap_or(&false));
                let nibble =
                    bit("d4") | (bit("d5") << 1) | (bit("d6") << 2) | (bit("d7") << 3);
                out.push((nibble, *levels.get("rs").unwrap_or(&false)));
            }
            levels.insert(edge.pin, edge.high);
        }
        out
    }

    #[test]
    fn init_runs_the_4bit_wake_sequence() {
        let (mut lcd, log) = mock_lcd();
        lcd.init();
        let nibbles = latched_nibbles(&log.borrow());
        // Wake: 0x3, 0x3, 0x3, then 0x2 switches to 4-bit mode.
        assert_eq!(&nibbles[..4], &[(3, false), (3, false), (3, false), (2, false)]);
        // First full command is function-set 0x28.
        assert_eq!(&nibbles[4..6], &[(2, false), (8, false)]);
    }

    #[test]
    fn print_sends_character_data_with_rs_high() {
        let (mut lcd, log) = mock_lcd();
        lcd.print("A"); // 0x41
        let nibbles = latched_nibbles(&log.borrow());
        assert_eq!(nibbles, vec![(4, true), (1, true)]);
    }

    #[test]
    fn print_clips_to_row_width_and_replaces_non_ascii() {
        let (mut lcd, log) = mock_lcd();
        let long = "abcdefghijklmnopqrstuvwxyz";
        lcd.print(long);
        assert_eq!(latched_nibbles(&log.borrow()).len(), COLS as usize * 2);

        let (mut lcd, log) = mock_lcd();
        lcd.print("\u{00b0}"); // degree sign: two UTF-8 bytes, both non-ASCII
        let nibbles = latched_nibbles(&log.borrow());
        // '?' = 0x3F, once per raw byte.
        assert_eq!(
            nibbles,
            vec![(3, true), (0xF, true), (3, true), (0xF, true)]
        );
    }

    #[test]
    fn set_cursor_addresses_the_second_row() {
        let (mut lcd, log) = mock_lcd();
        lcd.set_cursor(1, 0);
        let nibbles = latched_nibbles(&log.borrow());
        // 0x80 | 0x40 = 0xC0.
        assert_eq!(nibbles, vec![(0xC, false), (0x0, false)]);
    }
}
