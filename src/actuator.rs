use crate::Result;
use crate::shared_constants::{SERVO_DISPENSE_DEGREES, SERVO_REST_DEGREES};

/// Where a slot's servo arm sits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoPosition {
    Dispense,
    Rest,
}

impl ServoPosition {
    #[must_use]
    pub const fn degrees(self) -> u8 {
        match self {
            Self::Dispense => SERVO_DISPENSE_DEGREES,
            Self::Rest => SERVO_REST_DEGREES,
        }
    }
}

/// One servo per slot.
pub trait DispenseActuator {
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSlotIndex`] if `slot` has no servo.
    fn set_position(&mut self, slot: usize, position: ServoPosition) -> Result<()>;
}
