use crate::*;

/// Monotonic millisecond counter the play loop measures every timer against.
///
/// `set` exists for pause handling: resuming winds the counter back to the moment the game
/// was paused so the paused interval never shows up in any timer.
pub trait Clock {
    fn now(&self) -> Millis;
    fn set(&mut self, now: Millis);
}

/// Clock advanced by hand, for tests and for hosts that count ticks themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Millis,
}

impl ManualClock {
    pub const fn new(now: Millis) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, by: Millis) {
        self.now = self.now.saturating_add(by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn set(&mut self, now: Millis) {
        self.now = now;
    }
}
