//! Wall-clock string shared between the 1 Hz timer ISR and the main loop.
//!
//! The clock is an 8-character `HH:MM:SS` ASCII buffer plus a `time_valid`
//! flag. Until the gateway sends a `TIME:` line the timer ISR free-runs
//! the clock at 1 Hz; once a valid time arrives, `time_valid` latches true
//! and the local increment stops permanently (until reset).
//!
//! Both sides go through a blocking critical-section mutex, so a reader
//! can never observe a half-updated time string. `WallClock::new` is
//! `const`, so adapters can place one in a `static` reachable from the
//! timer ISR.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Length of the `HH:MM:SS` buffer.
pub const CLOCK_LEN: usize = 8;

struct ClockState {
    text: [u8; CLOCK_LEN],
    time_valid: bool,
}

/// Owned `HH:MM:SS` clock with ISR-safe interior mutability.
pub struct WallClock {
    state: Mutex<CriticalSectionRawMutex, RefCell<ClockState>>,
}

/// A consistent copy of the clock, taken under the critical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStamp {
    pub text: [u8; CLOCK_LEN],
    pub time_valid: bool,
}

impl ClockStamp {
    /// The time as `&str`. The stored buffer only ever holds ASCII
    /// digits and colons, so this cannot fail in practice.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.text).unwrap_or("--:--:--")
    }
}

impl WallClock {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(ClockState {
                text: *b"00:00:00",
                time_valid: false,
            })),
        }
    }

    /// Advance the clock by one second. Called from the 1 Hz timer ISR.
    ///
    /// Free-run backup only: once a gateway time has been accepted the
    /// tick is a no-op and the gateway remains the sole time source.
    pub fn tick_second(&self) {
        self.state.lock(|cell| {
            let mut s = cell.borrow_mut();
            if s.time_valid {
                return;
            }

            let mut hh = digits(&s.text, 0);
            let mut mm = digits(&s.text, 3);
            let mut ss = digits(&s.text, 6);

            ss += 1;
            if ss >= 60 {
                ss = 0;
                mm += 1;
                if mm >= 60 {
                    mm = 0;
                    hh += 1;
                    if hh >= 24 {
                        hh = 0;
                    }
                }
            }

            put_digits(&mut s.text, 0, hh);
            put_digits(&mut s.text, 3, mm);
            put_digits(&mut s.text, 6, ss);
        });
    }

    /// Accept a gateway-supplied `HH:MM:SS` and latch `time_valid`.
    ///
    /// Rejects buffers that are not digit/colon shaped; returns whether
    /// the time was accepted. Acceptance stops the free-run for good.
    pub fn set_hms(&self, text: &[u8; CLOCK_LEN]) -> bool {
        if !is_hms_shaped(text) {
            return false;
        }
        self.state.lock(|cell| {
            let mut s = cell.borrow_mut();
            s.text = *text;
            s.time_valid = true;
        });
        true
    }

    /// A consistent copy of the current time and validity flag.
    pub fn snapshot(&self) -> ClockStamp {
        self.state.lock(|cell| {
            let s = cell.borrow();
            ClockStamp {
                text: s.text,
                time_valid: s.time_valid,
            }
        })
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

fn digits(text: &[u8; CLOCK_LEN], at: usize) -> u8 {
    (text[at] - b'0') * 10 + (text[at + 1] - b'0')
}

fn put_digits(text: &mut [u8; CLOCK_LEN], at: usize, value: u8) {
    text[at] = b'0' + value / 10;
    text[at + 1] = b'0' + value % 10;
}

fn is_hms_shaped(text: &[u8; CLOCK_LEN]) -> bool {
    text.iter().enumerate().all(|(i, &b)| match i {
        2 | 5 => b == b':',
        _ => b.is_ascii_digit(),
    })
}
