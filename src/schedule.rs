//! The medication slot table.

use crate::date_time::DateTime;
use crate::shared_constants::{SLOT_COUNT, SLOT_NAMES};

/// How often a slot recurs. The discriminant is the code shown in the editor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Frequency {
    #[default]
    None = 0,
    Daily = 1,
    Weekly = 2,
    Monthly = 3,
}

impl Frequency {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Unknown codes are treated as `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Daily,
            2 => Self::Weekly,
            3 => Self::Monthly,
            _ => Self::None,
        }
    }
}

/// One configurable medication.
///
/// `day` is the weekday (0 = Sunday) for weekly slots and the day of month for monthly slots.
/// Daily slots ignore it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MedicationSlot {
    pub name: &'static str,
    pub frequency: Frequency,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub pill_count: u8,
    pub fired_this_minute: bool,
}

impl MedicationSlot {
    /// An unscheduled slot.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            frequency: Frequency::None,
            day: 0,
            hour: 0,
            minute: 0,
            pill_count: 1,
            fired_this_minute: false,
        }
    }

    /// Whether `now` matches this slot's schedule. Ignores `fired_this_minute`.
    #[must_use]
    pub const fn is_due(&self, now: &DateTime) -> bool {
        let at_time = now.hour == self.hour && now.minute == self.minute;
        match self.frequency {
            Frequency::None => false,
            Frequency::Daily => at_time,
            Frequency::Weekly => at_time && now.day_of_week == self.day,
            Frequency::Monthly => at_time && now.day == self.day,
        }
    }
}

/// The three slots. Lives in RAM only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleStore {
    slots: [MedicationSlot; SLOT_COUNT],
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [
                MedicationSlot::new(SLOT_NAMES[0]),
                MedicationSlot::new(SLOT_NAMES[1]),
                MedicationSlot::new(SLOT_NAMES[2]),
            ],
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MedicationSlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MedicationSlot> {
        self.slots.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MedicationSlot> {
        self.slots.iter_mut()
    }

    /// Clear every slot's `fired_this_minute` flag.
    pub fn reset_fired(&mut self) {
        for slot in &mut self.slots {
            slot.fired_this_minute = false;
        }
    }
}
