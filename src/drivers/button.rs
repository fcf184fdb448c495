//! Button edge detection.
//!
//! Buttons are active-low with pull-ups. A press is reported only on the
//! released-to-pressed transition, so a held button yields exactly one
//! event. The 20 ms contact-settle wait after a detected edge lives in
//! the hardware port (`InputPort::debounce_wait`), not here, keeping this
//! layer pure and host-testable.

/// The five front-panel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    /// Arms or extends the alarm countdown.
    Alarm,
    /// Selects the analog temperature/humidity view.
    AnalogView,
    /// Selects the digital sensor view.
    DigitalView,
    /// Selects the ambient light view.
    LightView,
    /// Selects the clock view.
    TimeView,
}

impl ButtonId {
    pub const COUNT: usize = 5;

    pub const fn index(self) -> usize {
        match self {
            ButtonId::Alarm => 0,
            ButtonId::AnalogView => 1,
            ButtonId::DigitalView => 2,
            ButtonId::LightView => 3,
            ButtonId::TimeView => 4,
        }
    }
}

/// Per-button previous-level tracker for edge detection.
pub struct Debouncer {
    prev_high: [bool; ButtonId::COUNT],
}

impl Debouncer {
    /// All buttons start released (pulled-up high).
    pub const fn new() -> Self {
        Self {
            prev_high: [true; ButtonId::COUNT],
        }
    }

    /// Feed one sampled level. Returns `true` exactly once per
    /// high-to-low transition.
    pub fn update(&mut self, id: ButtonId, level_high: bool) -> bool {
        let was_high = self.prev_high[id.index()];
        self.prev_high[id.index()] = level_high;
        was_high && !level_high
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
