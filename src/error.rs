//! Unified error types for the EnvNode firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! main loop's error handling uniform. All variants are `Copy` so they can
//! be threaded through the state machine without allocation. Nothing here
//! is fatal: every error degrades the affected reading and the loop keeps
//! running.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A two-wire bus transaction failed.
    Bus(BusError),
    /// The serial link dropped inbound data.
    Link(LinkError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Two-wire bus errors
// ---------------------------------------------------------------------------

/// Failure codes for one digital-sensor bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The device did not acknowledge its address byte.
    NoAck,
    /// The device acknowledged its address but not the command byte.
    CommandNack,
    /// Every read attempt went unacknowledged (retries exhausted).
    ReadFailed,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAck => write!(f, "no ACK on address"),
            Self::CommandNack => write!(f, "no ACK on command"),
            Self::ReadFailed => write!(f, "read retries exhausted"),
        }
    }
}

impl From<BusError> for Error {
    fn from(e: BusError) -> Self {
        Self::Bus(e)
    }
}

// ---------------------------------------------------------------------------
// Serial link errors
// ---------------------------------------------------------------------------

/// Inbound serial degradations. These are counted, never propagated — the
/// line assembler drops data rather than stalling the receive interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// An inbound line exceeded the buffer capacity; excess bytes dropped.
    BufferOverrun,
    /// A completed line arrived while the previous one was unconsumed.
    LineDropped,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferOverrun => write!(f, "line buffer overrun"),
            Self::LineDropped => write!(f, "completed line dropped"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}
