//! Alarm countdown state.
//!
//! Armed by the first alarm-button press, extended by further presses
//! while running, expired when the countdown reaches zero. While active
//! the alarm pre-empts every display mode change (enforced by the
//! service, not here). The decrement is driven by the 1 Hz timer event,
//! one second of wall time per tick.

/// Countdown state. `remaining_secs` is meaningful only while `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmState {
    active: bool,
    remaining_secs: u32,
}

/// Outcome of an alarm-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmPress {
    /// Countdown armed with the initial duration.
    Armed(u32),
    /// Countdown already running; duration extended.
    Extended(u32),
}

/// Outcome of one 1 Hz tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmTick {
    /// No countdown running.
    Inactive,
    /// Countdown running; seconds remaining after this tick.
    Running(u32),
    /// Countdown just hit zero; the alarm has deactivated itself.
    Expired,
}

impl AlarmState {
    pub const fn new() -> Self {
        Self {
            active: false,
            remaining_secs: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Apply one alarm-button press: arm when inactive, extend when active.
    pub fn press(&mut self, initial_secs: u32, extend_secs: u32) -> AlarmPress {
        if self.active {
            self.remaining_secs = self.remaining_secs.saturating_add(extend_secs);
            AlarmPress::Extended(self.remaining_secs)
        } else {
            self.active = true;
            self.remaining_secs = initial_secs;
            AlarmPress::Armed(self.remaining_secs)
        }
    }

    /// Advance the countdown by one second of wall time.
    pub fn second_tick(&mut self) -> AlarmTick {
        if !self.active {
            return AlarmTick::Inactive;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.active = false;
            AlarmTick::Expired
        } else {
            AlarmTick::Running(self.remaining_secs)
        }
    }
}

impl Default for AlarmState {
    fn default() -> Self {
        Self::new()
    }
}
