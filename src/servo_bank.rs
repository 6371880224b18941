use crate::actuator::{DispenseActuator, ServoPosition};
use crate::servo::Servo;
use crate::shared_constants::{SERVO_REST_DEGREES, SLOT_COUNT};
use crate::{Error, Result};

/// One dispensing servo per slot, indexed like the schedule.
pub struct ServoBank<'d> {
    servos: [Servo<'d>; SLOT_COUNT],
}

impl<'d> ServoBank<'d> {
    /// Park every arm at rest.
    #[must_use]
    pub fn new(mut servos: [Servo<'d>; SLOT_COUNT]) -> Self {
        for servo in &mut servos {
            servo.set_degrees(SERVO_REST_DEGREES);
        }
        Self { servos }
    }
}

impl DispenseActuator for ServoBank<'_> {
    fn set_position(&mut self, slot: usize, position: ServoPosition) -> Result<()> {
        let servo = self
            .servos
            .get_mut(slot)
            .ok_or(Error::InvalidSlotIndex(slot))?;
        servo.set_degrees(position.degrees());
        Ok(())
    }
}
