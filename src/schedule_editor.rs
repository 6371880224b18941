//! Interactive slot configuration. Fields clamp at their bounds instead of wrapping.

use embedded_hal_async::delay::DelayNs;

use crate::devices::{Devices, SessionOutcome, pause};
use crate::input::{Adjust, InputSampler, InputSnapshot, Move};
use crate::panel::{TextPanel, format_line, show_lines};
use crate::schedule::{Frequency, ScheduleStore};
use crate::shared_constants::{SCHEDULE_CADENCE, SLOT_COUNT, SLOT_CYCLE_GUARD};
use crate::{Error, Result};

/// The editable slot fields, in cursor order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleField {
    #[default]
    Frequency,
    Day,
    Hour,
    Minute,
    PillCount,
}

impl ScheduleField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frequency => "Freq",
            Self::Day => "Day",
            Self::Hour => "Hour",
            Self::Minute => "Min",
            Self::PillCount => "Pills",
        }
    }

    /// Inclusive `(min, max)`.
    #[must_use]
    pub const fn bounds(self) -> (u8, u8) {
        match self {
            Self::Frequency => (Frequency::Daily.code(), Frequency::Monthly.code()),
            Self::Day => (0, 31),
            Self::Hour => (0, 23),
            Self::Minute => (0, 59),
            Self::PillCount => (1, 10),
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Frequency => Self::Day,
            Self::Day => Self::Hour,
            Self::Hour => Self::Minute,
            Self::Minute => Self::PillCount,
            Self::PillCount => Self::Frequency,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Frequency => Self::PillCount,
            Self::Day => Self::Frequency,
            Self::Hour => Self::Day,
            Self::Minute => Self::Hour,
            Self::PillCount => Self::Minute,
        }
    }
}

/// What a save wrote, for the log.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SavedSchedule {
    pub index: usize,
    pub frequency: Frequency,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub pill_count: u8,
}

/// Scratch copy of one slot plus the editor's cursor.
///
/// Values are kept as the raw numbers shown on screen. A slot that was never configured loads
/// as frequency 0; the first adjustment pulls it into `1..=3`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditBuffer {
    index: usize,
    field: ScheduleField,
    frequency: u8,
    day: u8,
    hour: u8,
    minute: u8,
    pill_count: u8,
}

impl EditBuffer {
    /// Load slot `index` with the cursor on frequency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSlotIndex`] if there is no such slot.
    pub fn load(store: &ScheduleStore, index: usize) -> Result<Self> {
        let mut buffer = Self {
            index,
            field: ScheduleField::default(),
            frequency: 0,
            day: 0,
            hour: 0,
            minute: 0,
            pill_count: 0,
        };
        buffer.reload(store, index)?;
        Ok(buffer)
    }

    /// Replace the values with slot `index`, keeping the cursor where it is.
    fn reload(&mut self, store: &ScheduleStore, index: usize) -> Result<()> {
        let slot = store.get(index).ok_or(Error::InvalidSlotIndex(index))?;
        self.index = index;
        self.frequency = slot.frequency.code();
        self.day = slot.day;
        self.hour = slot.hour;
        self.minute = slot.minute;
        self.pill_count = slot.pill_count;
        Ok(())
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn field(&self) -> ScheduleField {
        self.field
    }

    #[must_use]
    pub const fn value(&self, field: ScheduleField) -> u8 {
        match field {
            ScheduleField::Frequency => self.frequency,
            ScheduleField::Day => self.day,
            ScheduleField::Hour => self.hour,
            ScheduleField::Minute => self.minute,
            ScheduleField::PillCount => self.pill_count,
        }
    }

    const fn value_mut(&mut self, field: ScheduleField) -> &mut u8 {
        match field {
            ScheduleField::Frequency => &mut self.frequency,
            ScheduleField::Day => &mut self.day,
            ScheduleField::Hour => &mut self.hour,
            ScheduleField::Minute => &mut self.minute,
            ScheduleField::PillCount => &mut self.pill_count,
        }
    }

    pub fn increment(&mut self) {
        let field = self.field;
        let (min, max) = field.bounds();
        let value = self.value_mut(field);
        *value = value.saturating_add(1).clamp(min, max);
    }

    pub fn decrement(&mut self) {
        let field = self.field;
        let (min, max) = field.bounds();
        let value = self.value_mut(field);
        *value = value.saturating_sub(1).clamp(min, max);
    }

    /// Apply one joystick sample: move the cursor, then adjust the (new) field.
    pub fn apply(&mut self, snapshot: &InputSnapshot) {
        match snapshot.movement() {
            Some(Move::Previous) => self.field = self.field.previous(),
            Some(Move::Next) => self.field = self.field.next(),
            None => {}
        }
        match snapshot.adjustment() {
            Some(Adjust::Increment) => self.increment(),
            Some(Adjust::Decrement) => self.decrement(),
            None => {}
        }
    }

    /// Switch to the next slot, discarding unsaved values.
    ///
    /// # Errors
    ///
    /// Only fails if the store has fewer than [`SLOT_COUNT`] slots.
    pub fn cycle_slot(&mut self, store: &ScheduleStore) -> Result<()> {
        self.reload(store, (self.index + 1) % SLOT_COUNT)
    }

    /// Write the five values into the slot being edited. `fired_this_minute` is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSlotIndex`] if the slot has gone away.
    pub fn save(&self, store: &mut ScheduleStore) -> Result<SavedSchedule> {
        let slot = store
            .get_mut(self.index)
            .ok_or(Error::InvalidSlotIndex(self.index))?;
        slot.frequency = Frequency::from_code(self.frequency);
        slot.day = self.day;
        slot.hour = self.hour;
        slot.minute = self.minute;
        slot.pill_count = self.pill_count;
        Ok(SavedSchedule {
            index: self.index,
            frequency: slot.frequency,
            day: slot.day,
            hour: slot.hour,
            minute: slot.minute,
            pill_count: slot.pill_count,
        })
    }

    /// Row 0 `Drug N`, row 1 `<label>: <value>`.
    ///
    /// # Errors
    ///
    /// Never in practice; every rendered value fits on a row.
    pub async fn render(&self, panel: &mut impl TextPanel) -> Result<()> {
        let title = format_line(format_args!("Drug {}", self.index + 1))?;
        let detail = format_line(format_args!(
            "{}: {}",
            self.field.label(),
            self.value(self.field)
        ))?;
        show_lines(panel, &title, &detail).await;
        Ok(())
    }
}

/// Run a schedule-editing session on slot `*index` until commit or cancel.
///
/// The buffer is loaded fresh on entry, so edits abandoned by a mode switch never reappear.
/// Each slot-cycle press (a released-to-pressed change) advances `*index`, so the next session
/// starts on the slot the user last selected.
///
/// # Errors
///
/// Returns [`Error::InvalidSlotIndex`] if `*index` is not a slot.
pub async fn run_schedule_editor<P, C, A, I, D>(
    store: &mut ScheduleStore,
    index: &mut usize,
    devices: &mut Devices<P, C, A, I, D>,
) -> Result<SessionOutcome>
where
    P: TextPanel,
    I: InputSampler,
    D: DelayNs,
{
    let mut buffer = EditBuffer::load(store, *index)?;
    let mut slot_cycle_held = false;

    let exit = loop {
        let mut snapshot = devices.input.sample();
        if snapshot.exit_requested() {
            break snapshot;
        }
        if snapshot.slot_cycle && !slot_cycle_held {
            buffer.cycle_slot(store)?;
            *index = buffer.index();
            #[cfg(feature = "defmt")]
            defmt::info!("Switched to Drug {}", buffer.index() + 1);
            pause(&mut devices.delay, SLOT_CYCLE_GUARD).await;
            // The joystick is read again once the guard is over.
            snapshot = devices.input.sample();
            if snapshot.exit_requested() {
                break snapshot;
            }
        }
        slot_cycle_held = snapshot.slot_cycle;

        buffer.apply(&snapshot);
        buffer.render(&mut devices.panel).await?;
        pause(&mut devices.delay, SCHEDULE_CADENCE).await;
    };

    if exit.commit {
        let saved = buffer.save(store)?;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Saved => Drug #{}: Freq={}, Day={}, Hour={}, Min={}, Pills={}",
            saved.index + 1,
            saved.frequency.code(),
            saved.day,
            saved.hour,
            saved.minute,
            saved.pill_count
        );
        #[cfg(not(feature = "defmt"))]
        let _ = saved;
        Ok(SessionOutcome::Committed)
    } else {
        Ok(SessionOutcome::Cancelled)
    }
}
