//! Interactive RTC adjustment. Fields wrap around; nothing here can go out of range.

use embedded_hal_async::delay::DelayNs;

use crate::date_time::{ClockSource, DateTime};
use crate::devices::{Devices, SessionOutcome, pause};
use crate::input::{Adjust, InputSampler, InputSnapshot, Move};
use crate::panel::{PanelLine, TextPanel, format_line, show_lines};
use crate::shared_constants::{MESSAGE_HOLD, TIME_SET_CADENCE};
use crate::Result;

/// The editable fields, in cursor order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    #[default]
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl TimeField {
    /// Display column of the `>>` marker, over the first characters of `YYYY/MM/DD HH:MM`.
    #[must_use]
    pub const fn column(self) -> u8 {
        match self {
            Self::Year => 0,
            Self::Month => 5,
            Self::Day => 8,
            Self::Hour => 11,
            Self::Minute => 14,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Year => Self::Month,
            Self::Month => Self::Day,
            Self::Day => Self::Hour,
            Self::Hour => Self::Minute,
            Self::Minute => Self::Year,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Year => Self::Minute,
            Self::Month => Self::Year,
            Self::Day => Self::Month,
            Self::Hour => Self::Day,
            Self::Minute => Self::Hour,
        }
    }
}

/// Working copy of the clock while it is being edited. Seconds are not editable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeDraft {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl From<&DateTime> for TimeDraft {
    fn from(now: &DateTime) -> Self {
        Self {
            year: now.year,
            month: now.month,
            day: now.day,
            hour: now.hour,
            minute: now.minute,
        }
    }
}

impl TimeDraft {
    /// Month wraps 1..=12, day 1..=31 (whatever the month), hour 0..=23, minute 0..=59.
    /// Year has no wrap; it only saturates at the ends of `u16`.
    pub fn increment(&mut self, field: TimeField) {
        match field {
            TimeField::Year => self.year = self.year.saturating_add(1),
            TimeField::Month => self.month = self.month % 12 + 1,
            TimeField::Day => self.day = self.day % 31 + 1,
            TimeField::Hour => self.hour = (self.hour + 1) % 24,
            TimeField::Minute => self.minute = (self.minute + 1) % 60,
        }
    }

    pub fn decrement(&mut self, field: TimeField) {
        match field {
            TimeField::Year => self.year = self.year.saturating_sub(1),
            TimeField::Month => self.month = wrap_down(self.month, 1, 12),
            TimeField::Day => self.day = wrap_down(self.day, 1, 31),
            TimeField::Hour => self.hour = wrap_down(self.hour, 0, 23),
            TimeField::Minute => self.minute = wrap_down(self.minute, 0, 59),
        }
    }

    /// The committed value: seconds are always zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidClockValue`] if the year is outside the calendar.
    pub fn to_date_time(&self) -> Result<DateTime> {
        DateTime::new(self.year, self.month, self.day, self.hour, self.minute, 0)
    }

    /// `YYYY/MM/DD HH:MM`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FormatError`] for a five-digit year.
    pub fn render(&self) -> Result<PanelLine> {
        format_line(format_args!(
            "{:04}/{:02}/{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        ))
    }
}

const fn wrap_down(value: u8, min: u8, max: u8) -> u8 {
    if value <= min { max } else { value - 1 }
}

/// Cursor plus draft: everything the time-set loop mutates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSetSession {
    pub draft: TimeDraft,
    pub field: TimeField,
}

impl TimeSetSession {
    #[must_use]
    pub fn new(now: &DateTime) -> Self {
        Self {
            draft: TimeDraft::from(now),
            field: TimeField::default(),
        }
    }

    /// Apply one joystick sample: adjust the selected field, then move the cursor.
    pub fn apply(&mut self, snapshot: &InputSnapshot) {
        match snapshot.adjustment() {
            Some(Adjust::Increment) => self.draft.increment(self.field),
            Some(Adjust::Decrement) => self.draft.decrement(self.field),
            None => {}
        }
        match snapshot.movement() {
            Some(Move::Previous) => self.field = self.field.previous(),
            Some(Move::Next) => self.field = self.field.next(),
            None => {}
        }
    }
}

/// Run a time-set session until commit or cancel.
///
/// Commit writes the draft back with seconds zeroed and shows "Time Updated!"; cancel shows
/// "Edit Cancelled". Either message stays up for [`MESSAGE_HOLD`].
///
/// # Errors
///
/// Fails if the clock cannot be read on entry.
pub async fn run_time_set<P, C, A, I, D>(
    devices: &mut Devices<P, C, A, I, D>,
) -> Result<SessionOutcome>
where
    P: TextPanel,
    C: ClockSource,
    I: InputSampler,
    D: DelayNs,
{
    let now = devices.clock.now()?;
    let mut session = TimeSetSession::new(&now);

    devices.panel.clear().await;
    devices.panel.set_cursor(0, 0).await;
    devices.panel.print("Set Time:").await;

    let exit = loop {
        let snapshot = devices.input.sample();
        if snapshot.exit_requested() {
            break snapshot;
        }
        render(&mut devices.panel, &session).await;
        session.apply(&snapshot);
        pause(&mut devices.delay, TIME_SET_CADENCE).await;
    };

    let outcome = if exit.commit {
        let message = match commit(&mut devices.clock, &session.draft) {
            Ok(()) => "Time Updated!",
            Err(_) => "Update Failed",
        };
        show_lines(&mut devices.panel, message, "").await;
        SessionOutcome::Committed
    } else {
        show_lines(&mut devices.panel, "Edit Cancelled", "").await;
        SessionOutcome::Cancelled
    };
    pause(&mut devices.delay, MESSAGE_HOLD).await;
    devices.panel.clear().await;
    Ok(outcome)
}

fn commit(clock: &mut impl ClockSource, draft: &TimeDraft) -> Result<()> {
    let result = draft.to_date_time().and_then(|date_time| clock.set(&date_time));
    #[cfg(feature = "defmt")]
    match &result {
        Ok(()) => defmt::info!("Clock set to {}", draft),
        Err(err) => defmt::error!("Clock set failed: {}", defmt::Display2Format(err)),
    }
    result
}

async fn render(panel: &mut impl TextPanel, session: &TimeSetSession) {
    const BLANK_ROW: &str = "                ";
    panel.set_cursor(0, 1).await;
    panel.print(BLANK_ROW).await;
    panel.set_cursor(0, 1).await;
    if let Ok(line) = session.draft.render() {
        panel.print(&line).await;
    }
    panel.set_cursor(session.field.column(), 1).await;
    panel.print(">>").await;
}
