//! Operating modes, the single-writer mode state machine, and the mode-switch debouncer.

use embassy_time::Instant;

use crate::shared_constants::MODE_DEBOUNCE;

/// Which handler owns the panel, clock, and servos.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Show the time and dispense when due.
    #[default]
    Normal = 0,
    TimeSet = 1,
    Scheduling = 2,
}

impl Mode {
    /// The mode-switch cycle: Normal, TimeSet, Scheduling, Normal, ...
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Normal => Self::TimeSet,
            Self::TimeSet => Self::Scheduling,
            Self::Scheduling => Self::Normal,
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// A change of mode, returned so the caller can log it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
}

/// Owns the current mode. Nothing else writes it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ModeMachine {
    mode: Mode,
}

impl ModeMachine {
    #[must_use]
    pub const fn new() -> Self {
        Self { mode: Mode::Normal }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// A mode-switch press.
    pub const fn advance(&mut self) -> ModeTransition {
        self.go_to(self.mode.next())
    }

    /// An editor session finished on its own.
    pub const fn return_to_normal(&mut self) -> ModeTransition {
        self.go_to(Mode::Normal)
    }

    const fn go_to(&mut self, to: Mode) -> ModeTransition {
        let from = self.mode;
        self.mode = to;
        ModeTransition { from, to }
    }
}

/// Turns periodic samples of the mode-switch button into single presses.
///
/// A pressed sample fires only while armed. After firing, the button has to read released
/// continuously for [`MODE_DEBOUNCE`] before the next press counts, so holding the button or
/// contact bounce cannot cycle through several modes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModeSwitchDebouncer {
    armed: bool,
    released_since: Option<Instant>,
}

impl Default for ModeSwitchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeSwitchDebouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            armed: true,
            released_since: None,
        }
    }

    /// Feed one sample. Returns `true` when this sample is a new press.
    pub fn poll(&mut self, pressed: bool, now: Instant) -> bool {
        if pressed {
            self.released_since = None;
            let fired = self.armed;
            self.armed = false;
            return fired;
        }
        if !self.armed {
            let since = *self.released_since.get_or_insert(now);
            if now.saturating_duration_since(since) >= MODE_DEBOUNCE {
                self.armed = true;
                self.released_since = None;
            }
        }
        false
    }
}

/// Source of debounced mode-switch presses.
pub trait ModeSwitch {
    /// Resolve on the next press.
    async fn wait_for_press(&mut self);
}
