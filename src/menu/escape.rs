//! Lone-ESC disambiguation timer.
//!
//! A bare ESC keypress and the lead byte of a VT100 control sequence (arrow
//! keys and friends) start identically on the wire, so the only way to tell
//! them apart is to wait: if a follow-up byte arrives within a short window
//! the ESC belonged to a sequence, otherwise it stood alone.
//!
//! The timer is a tick-counted single-shot owned by the engine. Expiry is
//! observed at the start of the next [`process`](super::Engine::process) call
//! rather than fired from a timer-service context, so no session state is
//! ever shared with an interrupt and no critical section is needed. The
//! window is a few scheduler ticks; at typical tick rates that is well below
//! human double-press speed and well above the gap between the bytes of one
//! terminal sequence.

/// Default disambiguation window, in scheduler ticks.
pub const DEFAULT_WINDOW_TICKS: u8 = 3;

/// Single-shot countdown separating a lone ESC from an escape sequence.
#[derive(Debug)]
pub struct EscapeTimer {
    window: u8,
    remaining: Option<u8>,
}

impl EscapeTimer {
    /// Create a disarmed timer with the given window.
    pub fn new(window: u8) -> Self {
        Self {
            window,
            remaining: None,
        }
    }

    /// Start (or restart) the countdown.
    pub fn arm(&mut self) {
        self.remaining = Some(self.window);
    }

    /// Stop the countdown; a follow-up byte arrived in time.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether a countdown is in progress.
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance one tick. Returns `true` exactly once per arming, on the tick
    /// the window elapses.
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            Some(0) => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - 1);
                false
            }
            None => false,
        }
    }
}

impl Default for EscapeTimer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_TICKS)
    }
}
