//! Time and angle utilities for the NavStars twilight core.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions and weekday lookup
//! - `CalendarDate`, the date shown next to every twilight table
//! - Fractional-hour → `"HH:MM UTC"` clock strings (truncating, never rounding)
//! - Non-negative wrapping of hours into [0, 24) and degrees into [0, 360)
//! - Greenwich mean sidereal time for low-precision horizontal coordinates

pub mod calendar;
pub mod clock;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use calendar::{CalendarDate, Weekday};
pub use clock::{
    NO_EVENT_TEXT, format_duration_minutes, format_event, format_utc_clock, wrap_degrees,
    wrap_hours,
};
pub use error::TimeError;
pub use julian::{J2000_JD, calendar_to_jd, jd_to_calendar, julian_centuries, weekday_index};
pub use sidereal::{gmst_deg, local_sidereal_time_deg};

/// Degrees → radians.
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees.
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Degrees of hour angle per hour of time.
pub const DEG_PER_HOUR: f64 = 15.0;

/// Minutes per day.
pub const MINUTES_PER_DAY: f64 = 1440.0;
