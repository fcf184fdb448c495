//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - The UART receive ISR (a full inbound line was assembled)
//! - The 1 Hz timer ISR (wall-clock second elapsed)
//! - Timer callbacks (main loop pacing)
//!
//! Events are consumed by the main control loop, which processes them
//! one at a time in FIFO order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ UART RX ISR │────▶│              │     │              │
//! │ 1 Hz timer  │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Loop timer  │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

/// System event types, ordered by rough priority.
/// Lower discriminant = higher priority when multiple events
/// are pending simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// A complete inbound line is waiting in the line assembler.
    LineReady = 0,
    /// One second of wall time elapsed (drives alarm countdown).
    SecondTick = 1,
    /// Main loop tick: poll buttons, sample sensors, refresh display.
    ControlTick = 10,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs write (produce), main loop reads (consume).
// Uses atomic head/tail indices. The buffer is intentionally
// kept in a static so ISR callbacks can access it.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER slots are written only by the producer side
// (ISR context) before the Release store of EVENT_HEAD, and read only
// by the consumer side (main loop) after the Acquire load of EVENT_HEAD.
// Interrupt handlers on this target do not nest, so there is exactly one
// writer and one reader per slot at any time.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; see EVENT_BUFFER invariant above.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; see EVENT_BUFFER invariant above.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback.
/// Processes events in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::LineReady),
        1 => Some(Event::SecondTick),
        10 => Some(Event::ControlTick),
        _ => None,
    }
}
