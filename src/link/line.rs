//! Interrupt-fed serial line assembly.
//!
//! The UART receive ISR pushes one byte at a time with [`LineAssembler::on_byte`];
//! the main loop collects completed lines with [`LineAssembler::take_line`].
//! Both sides go through a blocking critical-section mutex, so a line can
//! never be observed half-assembled. `new` is `const`, so an assembler
//! can live in a `static` reachable from the ISR.
//!
//! A line terminates on `\n` or `\r`; empty lines (the second half of a
//! CRLF pair) are ignored. Loss is never silent: bytes beyond the buffer
//! and lines completed before the previous one was consumed are counted
//! in [`LinkStats`], and [`LineAssembler::take_errors`] surfaces the
//! growth since the last call as typed [`LinkError`]s for the log.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::Vec;

use crate::error::LinkError;

/// Longest inbound line, terminator excluded.
pub const LINE_MAX: usize = 64;

/// Loss counters, readable from the main loop for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkStats {
    /// Bytes discarded because the active line buffer was full.
    pub dropped_bytes: u32,
    /// Completed lines discarded because the previous one was unread.
    pub dropped_lines: u32,
}

struct Shared {
    active: Vec<u8, LINE_MAX>,
    pending: Option<Vec<u8, LINE_MAX>>,
    stats: LinkStats,
    reported: LinkStats,
}

/// ISR-safe single-line assembler.
pub struct LineAssembler {
    shared: Mutex<CriticalSectionRawMutex, RefCell<Shared>>,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                active: Vec::new(),
                pending: None,
                stats: LinkStats {
                    dropped_bytes: 0,
                    dropped_lines: 0,
                },
                reported: LinkStats {
                    dropped_bytes: 0,
                    dropped_lines: 0,
                },
            })),
        }
    }

    /// Feed one received byte. Called from the UART receive ISR.
    ///
    /// Returns `true` when the byte completed a line, so the caller can
    /// signal the main loop.
    pub fn on_byte(&self, byte: u8) -> bool {
        self.shared.lock(|cell| {
            let mut s = cell.borrow_mut();
            if byte == b'\n' || byte == b'\r' {
                if s.active.is_empty() {
                    return false; // trailing half of a CRLF pair
                }
                let line = core::mem::take(&mut s.active);
                if s.pending.is_some() {
                    // Main loop has not consumed the previous line yet.
                    s.stats.dropped_lines += 1;
                    false
                } else {
                    s.pending = Some(line);
                    true
                }
            } else {
                if s.active.push(byte).is_err() {
                    s.stats.dropped_bytes += 1;
                }
                false
            }
        })
    }

    /// Take the completed line, if any. Called from the main loop.
    pub fn take_line(&self) -> Option<Vec<u8, LINE_MAX>> {
        self.shared.lock(|cell| cell.borrow_mut().pending.take())
    }

    /// Current loss counters.
    pub fn stats(&self) -> LinkStats {
        self.shared.lock(|cell| cell.borrow().stats)
    }

    /// Losses accumulated since the previous call, one entry per error
    /// kind with its count. Empty while nothing new was dropped, so the
    /// caller can log each loss burst exactly once.
    pub fn take_errors(&self) -> Vec<(LinkError, u32), 2> {
        self.shared.lock(|cell| {
            let mut s = cell.borrow_mut();
            let mut out = Vec::new();
            let bytes = s.stats.dropped_bytes - s.reported.dropped_bytes;
            if bytes > 0 {
                let _ = out.push((LinkError::BufferOverrun, bytes));
            }
            let lines = s.stats.dropped_lines - s.reported.dropped_lines;
            if lines > 0 {
                let _ = out.push((LinkError::LineDropped, lines));
            }
            s.reported = s.stats;
            out
        })
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
