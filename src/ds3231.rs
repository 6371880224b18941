//! DS3231 real-time clock, as a [`ClockSource`] over the `ds323x` driver.
//!
//! Register access, BCD and the 12-hour format are the driver's business. This module only
//! converts between its `NaiveDateTime` and [`DateTime`].

use ds323x::ic;
use ds323x::interface::I2cInterface;
use ds323x::{Datelike, DateTimeAccess, Ds323x, NaiveDate, NaiveDateTime, Timelike};
use embedded_hal::i2c::I2c;

use crate::date_time::{ClockSource, DateTime};
use crate::{Error, Result};

/// Where the chip answers on the bus.
pub const DS3231_ADDRESS: u8 = 0x68;

/// Years that can be written. The driver may accept fewer.
const WRITABLE_YEARS: core::ops::RangeInclusive<u16> = 2000..=2199;

/// A DS3231 on a blocking I2C bus.
pub struct Ds3231<I2C> {
    rtc: Ds323x<I2cInterface<I2C>, ic::DS3231>,
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Check that the chip answers, then wrap it.
    ///
    /// A chip that answers with a nonsense time still counts as present; reads will report it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockNotFound`] if nothing acknowledges at [`DS3231_ADDRESS`].
    pub fn new(i2c: I2C) -> Result<Self> {
        let mut rtc = Ds323x::new_ds3231(i2c);
        if let Err(ds323x::Error::Comm(_)) = rtc.datetime() {
            return Err(Error::ClockNotFound);
        }
        Ok(Self { rtc })
    }

    pub fn release(self) -> I2C {
        self.rtc.destroy_ds3231()
    }
}

impl<I2C: I2c> ClockSource for Ds3231<I2C> {
    fn now(&mut self) -> Result<DateTime> {
        let reading = self.rtc.datetime().map_err(|err| match err {
            ds323x::Error::Comm(_) => Error::ClockBus,
            _ => Error::InvalidClockValue,
        })?;
        from_naive(&reading)
    }

    fn set(&mut self, date_time: &DateTime) -> Result<()> {
        let naive = to_naive(date_time)?;
        self.rtc.set_datetime(&naive).map_err(|err| match err {
            ds323x::Error::Comm(_) => Error::ClockBus,
            _ => Error::InvalidClockValue,
        })
    }
}

fn from_naive(reading: &NaiveDateTime) -> Result<DateTime> {
    let field = |value: u32| u8::try_from(value).map_err(|_| Error::InvalidClockValue);
    let year = u16::try_from(reading.year()).map_err(|_| Error::InvalidClockValue)?;
    DateTime::new(
        year,
        field(reading.month())?,
        field(reading.day())?,
        field(reading.hour())?,
        field(reading.minute())?,
        field(reading.second())?,
    )
}

/// A day past the end of its month is written as the matching day of the next month.
fn to_naive(date_time: &DateTime) -> Result<NaiveDateTime> {
    if !WRITABLE_YEARS.contains(&date_time.year) {
        return Err(Error::InvalidClockValue);
    }
    let date = date_time.calendar_date()?;
    NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .and_then(|day| {
        day.and_hms_opt(
            u32::from(date_time.hour),
            u32::from(date_time.minute),
            u32::from(date_time.second),
        )
    })
    .ok_or(Error::InvalidClockValue)
}
