//! Buttons and joystick as seen by the editors.

use crate::shared_constants::ADC_FULL_SCALE;

/// Where a joystick axis sits. Only the two rails count as motion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rail {
    Low,
    #[default]
    Center,
    High,
}

impl Rail {
    /// Classify a raw 12-bit reading. Anything strictly between the rails is `Center`.
    #[must_use]
    pub const fn from_reading(reading: u16) -> Self {
        match reading {
            0 => Self::Low,
            ADC_FULL_SCALE => Self::High,
            _ => Self::Center,
        }
    }
}

/// Direction to change the selected field's value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adjust {
    Increment,
    Decrement,
}

/// Direction to move the field cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Move {
    Previous,
    Next,
}

/// One sample of everything an editor reads. Buttons are `true` while pressed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub commit: bool,
    pub cancel: bool,
    pub slot_cycle: bool,
    pub vertical: Rail,
    pub horizontal: Rail,
}

impl InputSnapshot {
    /// Editors leave their loop once commit or cancel is held.
    #[must_use]
    pub const fn exit_requested(&self) -> bool {
        self.commit || self.cancel
    }

    /// Vertical axis: up increments, down decrements.
    #[must_use]
    pub const fn adjustment(&self) -> Option<Adjust> {
        match self.vertical {
            Rail::High => Some(Adjust::Increment),
            Rail::Low => Some(Adjust::Decrement),
            Rail::Center => None,
        }
    }

    /// Horizontal axis: the high rail is left on the dispenser's joystick.
    #[must_use]
    pub const fn movement(&self) -> Option<Move> {
        match self.horizontal {
            Rail::High => Some(Move::Previous),
            Rail::Low => Some(Move::Next),
            Rail::Center => None,
        }
    }
}

/// Reads the commit, cancel, and slot-cycle buttons plus both joystick axes.
///
/// The mode-switch button is not part of this; see [`crate::ModeSwitch`].
pub trait InputSampler {
    fn sample(&mut self) -> InputSnapshot;
}
