//! Calendar date with weekday.
//!
//! `CalendarDate` is the civil date attached to a twilight computation.
//! It carries no time of day: twilight events are reported separately as
//! fractional UTC hours.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, jd_to_calendar, weekday_index};

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Weekday from an index where 0 = Sunday. Indices wrap modulo 7.
    pub const fn from_index(index: u32) -> Self {
        match index % 7 {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            _ => Self::Saturday,
        }
    }

    /// Index where 0 = Sunday.
    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

/// A civil calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: Weekday,
}

impl CalendarDate {
    /// Build a date, deriving the weekday from the calendar.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate(format!("month {month} out of range")));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate(format!(
                "day {day} out of range for {year:04}-{month:02}"
            )));
        }
        let jd = calendar_to_jd(year, month, day as f64);
        Ok(Self {
            year,
            month,
            day,
            weekday: Weekday::from_index(weekday_index(jd)),
        })
    }

    /// Calendar date containing the instant `jd`.
    pub fn from_jd(jd: f64) -> Result<Self, TimeError> {
        if !jd.is_finite() {
            return Err(TimeError::NonFiniteJd);
        }
        let (year, month, day_frac) = jd_to_calendar(jd);
        Ok(Self {
            year,
            month,
            day: day_frac.floor() as u32,
            weekday: Weekday::from_index(weekday_index(jd)),
        })
    }

    /// Julian Date of 0h UT on this date.
    pub fn jd_midnight(&self) -> f64 {
        calendar_to_jd(self.year, self.month, self.day as f64)
    }

    /// Julian Date of 12h UT on this date. Always an integer.
    pub fn jd_noon(&self) -> f64 {
        self.jd_midnight() + 0.5
    }
}

fn is_leap_year(year: i32) -> bool {
    if year < 1583 {
        year % 4 == 0
    } else {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

impl FromStr for CalendarDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`. A trailing `T...` time part is accepted and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date_part = s.trim().split('T').next().unwrap_or_default();
        let mut fields = date_part.splitn(3, '-');
        let parse_err = || TimeError::InvalidDate(format!("expected YYYY-MM-DD, got '{s}'"));

        let year = fields
            .next()
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(parse_err)?;
        let month = fields
            .next()
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(parse_err)?;
        let day = fields
            .next()
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(parse_err)?;

        Self::new(year, month, day)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {:04}-{:02}-{:02}",
            self.weekday.name(),
            self.year,
            self.month,
            self.day
        )
    }
}
