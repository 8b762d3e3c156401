//! Clock-string formatting and wrap-around arithmetic.
//!
//! Event times are fractional UTC hours. Before display they are wrapped
//! into [0, 24) and rendered as `"HH:MM UTC"` with the minutes truncated.

/// Placeholder rendered in place of a time when no event occurs.
pub const NO_EVENT_TEXT: &str = "--";

/// Offset added before wrapping hours, large enough to make any realistic
/// unwrapped value non-negative.
const HOURS_WRAP_OFFSET: f64 = 48.0;

/// Offset added before wrapping degrees.
const DEGREES_WRAP_OFFSET: f64 = 720.0;

/// Wrap a fractional hour into [0, 24).
///
/// Equivalent to `fmod(x + 48, 24)` for `x >= -48` and still correct below.
pub fn wrap_hours(hours: f64) -> f64 {
    wrap(hours + HOURS_WRAP_OFFSET, 24.0)
}

/// Wrap an angle in degrees into [0, 360).
pub fn wrap_degrees(deg: f64) -> f64 {
    wrap(deg + DEGREES_WRAP_OFFSET, 360.0)
}

fn wrap(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    // rem_euclid rounds tiny negative inputs up to exactly `period`
    if r >= period { 0.0 } else { r }
}

/// Format a fractional hour as `"HH:MM UTC"`.
///
/// Hour and minute are both truncated: `23.999` renders as `"23:59 UTC"`.
pub fn format_utc_clock(hours: f64) -> String {
    let hour = hours.trunc();
    let minute = ((hours - hour) * 60.0).trunc();
    format!("{:02}:{:02} UTC", hour as i32, minute as i32)
}

/// Format an optional event time, using [`NO_EVENT_TEXT`] for `None`.
pub fn format_event(hours: Option<f64>) -> String {
    match hours {
        Some(h) => format_utc_clock(h),
        None => NO_EVENT_TEXT.to_string(),
    }
}

/// Format an optional duration as whole minutes (`"39 min"`), truncated.
pub fn format_duration_minutes(minutes: Option<f64>) -> String {
    match minutes {
        Some(m) => format!("{} min", m.trunc() as i64),
        None => NO_EVENT_TEXT.to_string(),
    }
}
