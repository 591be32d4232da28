//! Calendar instants and Julian day numbers.
//!
//! The sun is placed from a local civil date-time plus an offset from Greenwich time.
//! The Julian day is computed from the local calendar fields; the offset only enters
//! the hour angle (see [`crate::ephemeris`]).

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::math::floor;
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{Datelike, Offset, TimeZone, Timelike};

/// Seconds per day (86,400)
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Microseconds per day
const MICROSECONDS_PER_DAY: f64 = 86_400_000_000.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00)
pub const J2000_JDN: f64 = 2_451_545.0;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Calculates the Julian day of a Gregorian calendar date and time of day.
///
/// January and February count as months 13 and 14 of the previous year, and the
/// Gregorian correction `2 - a + floor(a / 4)` is always applied, so the result is only
/// meaningful from 1582-10-15 onwards. No validation is done here; use [`Instant::new`]
/// for checked input.
///
/// # Example
/// ```
/// # use virtual_sun::time::julian_day;
/// assert_eq!(julian_day(2000, 1, 1, 12, 0, 0, 0), 2_451_545.0);
/// ```
#[must_use]
pub fn julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
) -> f64 {
    let d = f64::from(day)
        + f64::from(hour) / 24.0
        + f64::from(minute) / 1440.0
        + f64::from(second) / SECONDS_PER_DAY
        + f64::from(microsecond) / MICROSECONDS_PER_DAY;

    let (y, m) = if month <= 2 {
        (f64::from(year) - 1.0, f64::from(month) + 12.0)
    } else {
        (f64::from(year), f64::from(month))
    };

    // Gregorian calendar correction (after October 15, 1582)
    let a = floor(y / 100.0);
    let b = 2.0 - a + floor(a / 4.0);

    floor(365.25 * (y + 4716.0)) + floor(30.6001 * (m + 1.0)) + d + b - 1524.5
}

/// A local civil date and time in the Gregorian calendar.
///
/// # Example
/// ```
/// # use virtual_sun::time::Instant;
/// let instant = Instant::new(2011, 10, 7, 14, 0, 0, 0).unwrap();
/// assert!((instant.julian_day() - 2_455_842.083_333).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instant {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
}

impl Instant {
    /// Creates an instant from calendar fields.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for out-of-range fields, days that do not exist in the
    /// month, and dates before the Gregorian calendar (1582-10-15).
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::invalid_datetime("day must be between 1 and 31"));
        }
        if hour > 23 {
            return Err(Error::invalid_datetime("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(Error::invalid_datetime("minute must be between 0 and 59"));
        }
        if second > 59 {
            return Err(Error::invalid_datetime("second must be between 0 and 59"));
        }
        if microsecond > 999_999 {
            return Err(Error::invalid_datetime(
                "microsecond must be between 0 and 999999",
            ));
        }
        if !is_gregorian_date(year, month, day) {
            return Err(Error::invalid_datetime(
                "dates before 1582-10-15 are not in the Gregorian calendar",
            ));
        }
        if day > days_in_month(year, month) {
            return Err(Error::invalid_datetime("day is out of range for month"));
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        })
    }

    /// Creates an instant at a whole second.
    ///
    /// # Errors
    /// See [`Instant::new`].
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        Self::new(year, month, day, hour, minute, second, 0)
    }

    /// Creates an instant from a chrono naive date-time (local civil time).
    ///
    /// Sub-microsecond precision is dropped; a leap second is rejected.
    ///
    /// # Errors
    /// See [`Instant::new`].
    #[cfg(feature = "chrono")]
    pub fn from_naive(datetime: &chrono::NaiveDateTime) -> Result<Self> {
        Self::new(
            datetime.year(),
            datetime.month(),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            datetime.second(),
            datetime.nanosecond() / 1_000,
        )
    }

    /// Splits a timezone-aware date-time into its local instant and its offset from
    /// Greenwich time in hours.
    ///
    /// # Errors
    /// See [`Instant::new`].
    #[cfg(feature = "chrono")]
    pub fn from_datetime<Tz: TimeZone>(datetime: &chrono::DateTime<Tz>) -> Result<(Self, f64)> {
        let offset_seconds = datetime.offset().fix().local_minus_utc();
        let instant = Self::from_naive(&datetime.naive_local())?;
        Ok((instant, f64::from(offset_seconds) / 3600.0))
    }

    /// Gets the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Gets the month (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Gets the day of month.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Gets the hour (0-23).
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Gets the minute (0-59).
    #[must_use]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    /// Gets the second (0-59).
    #[must_use]
    pub const fn second(&self) -> u32 {
        self.second
    }

    /// Gets the microsecond (0-999999).
    #[must_use]
    pub const fn microsecond(&self) -> u32 {
        self.microsecond
    }

    /// Time of day as decimal hours.
    #[must_use]
    pub fn decimal_hours(&self) -> f64 {
        f64::from(self.hour)
            + f64::from(self.minute) / 60.0
            + f64::from(self.second) / 3600.0
            + f64::from(self.microsecond) / 3_600_000_000.0
    }

    /// Julian day of this instant.
    #[must_use]
    pub fn julian_day(&self) -> f64 {
        julian_day(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.microsecond,
        )
    }

    /// Days elapsed since the J2000.0 epoch.
    #[must_use]
    pub fn days_since_j2000(&self) -> f64 {
        self.julian_day() - J2000_JDN
    }

    /// Julian centuries elapsed since the J2000.0 epoch.
    #[must_use]
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_CENTURY
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDateTime> for Instant {
    type Error = Error;

    fn try_from(datetime: chrono::NaiveDateTime) -> Result<Self> {
        Self::from_naive(&datetime)
    }
}

const fn is_gregorian_date(year: i32, month: u32, day: u32) -> bool {
    year > 1582 || (year == 1582 && (month > 10 || (month == 10 && day >= 15)))
}

const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}
