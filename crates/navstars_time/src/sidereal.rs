//! Greenwich mean sidereal time (low precision).
//!
//! Meeus eq. 12.4. The UT1−UTC difference is ignored: callers pass a UTC
//! Julian Date, which is adequate at the minute-level accuracy of the
//! twilight model.

use crate::clock::wrap_degrees;
use crate::julian::{J2000_JD, julian_centuries};

/// Greenwich mean sidereal time in degrees, [0, 360).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    wrap_degrees(theta % 360.0)
}

/// Local mean sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time_deg(jd_ut: f64, longitude_east_deg: f64) -> f64 {
    wrap_degrees(gmst_deg(jd_ut) + longitude_east_deg)
}
