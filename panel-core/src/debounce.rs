//! Three-state debounce primitive shared by every physical button

use crate::hal::{Duration, Instant};

/// Debounce phases for one button channel
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncePhase {
    /// Released, waiting for a press
    Idle,
    /// Press seen, debounce window running
    PressPending,
    /// Press confirmed; sticky until the owner calls [`ButtonChannel::reset`]
    Confirmed,
}

/// Debounce state for one physical button.
///
/// `Confirmed` does not clear itself when the pin releases: the owning
/// controller observes the release, decides the semantic action (short
/// vs. long press, held vs. tapped) and resets the channel once the
/// event is consumed.
pub struct ButtonChannel {
    window: Duration,
    phase: DebouncePhase,
    pressed_at: Option<Instant>,
}

impl ButtonChannel {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            phase: DebouncePhase::Idle,
            pressed_at: None,
        }
    }

    /// Advance the debounce machine with a fresh raw sample and return
    /// the resulting phase.
    pub fn poll(&mut self, raw_pressed: bool, now: Instant) -> DebouncePhase {
        match self.phase {
            DebouncePhase::Idle => {
                if raw_pressed {
                    self.pressed_at = Some(now);
                    self.phase = DebouncePhase::PressPending;
                }
            }
            DebouncePhase::PressPending => {
                if self.held_for(now) >= self.window {
                    // Re-sample decides: still down is a real press,
                    // anything else was bounce.
                    if raw_pressed {
                        self.phase = DebouncePhase::Confirmed;
                    } else {
                        self.reset();
                    }
                }
            }
            DebouncePhase::Confirmed => {}
        }
        self.phase
    }

    pub fn phase(&self) -> DebouncePhase {
        self.phase
    }

    /// Timestamp of the raw press that started the current cycle
    pub fn press_started(&self) -> Option<Instant> {
        self.pressed_at
    }

    /// Sustained-down time since the raw press
    pub fn held_for(&self, now: Instant) -> Duration {
        match self.pressed_at {
            Some(at) => now.duration_since(at),
            None => Duration::from_millis(0),
        }
    }

    /// Return to `Idle`, consuming any confirmed press
    pub fn reset(&mut self) {
        self.phase = DebouncePhase::Idle;
        self.pressed_at = None;
    }
}
