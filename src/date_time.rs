//! Calendar date-time as kept by the RTC, plus the [`ClockSource`] seam.

use time::{Date, Month};

use crate::{Error, Result};

/// A wall-clock reading.
///
/// `day_of_week` counts from Sunday (0) to Saturday (6). It is always derived from the
/// date, so a day past the end of a short month (e.g. 31 June) rolls the weekday forward
/// as if the date had overflowed into the next month.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub day_of_week: u8,
}

impl DateTime {
    /// Build a date-time, validating each field and computing the weekday.
    ///
    /// Day may be anything in `1..=31` regardless of month.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClockValue`] if a field is out of range.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        if !(1..=31).contains(&day) || hour > 23 || minute > 59 || second > 59 {
            return Err(Error::InvalidClockValue);
        }
        let day_of_week = calendar_date(year, month, day)?
            .weekday()
            .number_days_from_sunday();
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            day_of_week,
        })
    }

    /// The calendar date this reading stands for, with an overflowed day carried into the
    /// next month.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClockValue`] if the month is not `1..=12`.
    pub fn calendar_date(&self) -> Result<Date> {
        calendar_date(self.year, self.month, self.day)
    }

    /// True on the first second of an hour.
    #[must_use]
    pub const fn is_top_of_hour(&self) -> bool {
        self.minute == 0 && self.second == 0
    }
}

fn calendar_date(year: u16, month: u8, day: u8) -> Result<Date> {
    let month = Month::try_from(month).map_err(|_| Error::InvalidClockValue)?;
    let first = Date::from_calendar_date(i32::from(year), month, 1)
        .map_err(|_| Error::InvalidClockValue)?;
    first
        .checked_add(time::Duration::days(i64::from(day) - 1))
        .ok_or(Error::InvalidClockValue)
}

/// Something that keeps wall-clock time, such as a DS3231.
pub trait ClockSource {
    /// Read the current date-time.
    ///
    /// # Errors
    ///
    /// Fails if the clock cannot be read or holds an impossible value.
    fn now(&mut self) -> Result<DateTime>;

    /// Replace the clock's date-time.
    ///
    /// # Errors
    ///
    /// Fails if the clock cannot be written or cannot represent `date_time`.
    fn set(&mut self, date_time: &DateTime) -> Result<()>;
}
