//! Linearized twilight calculator.
//!
//! Works from a single solar sample taken at Greenwich noon. Declination
//! and the equation of time change little within a day, so the crossing
//! times are obtained from the hour angle at the band's mean altitude,
//! and the band duration from the rate of altitude change at that hour
//! angle. Expected error is a few seconds, up to a minute or two after
//! truncation to whole minutes.

use navstars_core::{Body, EphemerisSource, ObserverLocation, SimulatedClock};
use navstars_time::{CalendarDate, DEG_PER_HOUR, MINUTES_PER_DAY, wrap_hours};

use crate::error::SearchError;
use crate::twilight_types::{DailyTwilight, SolarSnapshot, TwilightResult, TwilightThreshold};

/// Maximum theoretical twilight duration in minutes for a band of width
/// `band_deg` centred on `mean_altitude_deg`.
pub fn max_twilight_duration_minutes(mean_altitude_deg: f64, band_deg: f64) -> f64 {
    MINUTES_PER_DAY / 360.0 * mean_altitude_deg.to_radians().cos() * band_deg
}

/// Cosine of the hour angle at which a body of declination `dec_rad`
/// reaches `altitude_rad` for an observer at `latitude_rad`.
pub fn hour_angle_cosine(altitude_rad: f64, latitude_rad: f64, dec_rad: f64) -> f64 {
    (altitude_rad.sin() - latitude_rad.sin() * dec_rad.sin())
        / (latitude_rad.cos() * dec_rad.cos())
}

/// Hour angle magnitude (radians) at the altitude crossing, or `None` if the
/// altitude is never reached or never left on this date.
pub fn event_hour_angle(altitude_rad: f64, latitude_rad: f64, dec_rad: f64) -> Option<f64> {
    let arg = hour_angle_cosine(altitude_rad, latitude_rad, dec_rad);
    if arg.abs() > 1.0 || arg.is_nan() {
        None
    } else {
        Some(arg.acos())
    }
}

/// Solar transit in fractional UTC hours, unwrapped.
fn transit_unwrapped(location: &ObserverLocation, eot_min: f64) -> f64 {
    12.0 - eot_min / 60.0 - location.longitude_deg / DEG_PER_HOUR
}

fn no_event(transit: f64) -> TwilightResult {
    TwilightResult {
        morning_hours: None,
        evening_hours: None,
        duration_minutes: None,
        transit_hours: wrap_hours(transit),
        event_hour_angle_rad: None,
    }
}

/// Compute morning/evening crossing, duration and transit for one altitude.
///
/// `altitude_deg` is the band's mean solar altitude; `max_duration_minutes`
/// comes from [`max_twilight_duration_minutes`] (zero for sunrise/sunset).
///
/// A tangent crossing (`|arg| == 1`, hour angle 0 or π) has no usable
/// duration and is reported like a polar day or night.
pub fn compute_twilight(
    altitude_deg: f64,
    max_duration_minutes: f64,
    location: &ObserverLocation,
    solar: &SolarSnapshot,
) -> TwilightResult {
    let lat = location.latitude_rad();
    let dec = solar.declination_rad;
    let transit = transit_unwrapped(location, solar.equation_of_time_min);

    let Some(lha) = event_hour_angle(altitude_deg.to_radians(), lat, dec) else {
        return no_event(transit);
    };
    if lha.sin() <= f64::EPSILON {
        return no_event(transit);
    }

    let duration = max_duration_minutes / lat.cos() / dec.cos() / lha.sin();
    if !duration.is_finite() {
        return no_event(transit);
    }
    let lha_hours = lha.to_degrees() / DEG_PER_HOUR;
    let half_duration_hours = duration / 60.0 / 2.0;

    TwilightResult {
        morning_hours: Some(wrap_hours(transit - lha_hours - half_duration_hours)),
        evening_hours: Some(wrap_hours(transit + lha_hours + half_duration_hours)),
        duration_minutes: Some(duration),
        transit_hours: wrap_hours(transit),
        event_hour_angle_rad: Some(lha),
    }
}

/// [`compute_twilight`] for a named band.
pub fn compute_threshold(
    threshold: TwilightThreshold,
    location: &ObserverLocation,
    solar: &SolarSnapshot,
) -> TwilightResult {
    let alt = threshold.altitude_deg();
    compute_twilight(
        alt,
        max_twilight_duration_minutes(alt, threshold.band_deg()),
        location,
        solar,
    )
}

/// Sample the Sun's declination at `epoch_jd` (UT) and the equation of
/// time at `epoch_jde`.
pub fn solar_snapshot<E: EphemerisSource>(
    ephemeris: &E,
    epoch_jd: f64,
    epoch_jde: f64,
) -> Result<SolarSnapshot, SearchError> {
    let sun = ephemeris.resolve(Body::Sun)?;
    let eq = ephemeris.equatorial(sun, epoch_jd)?;
    let eot = ephemeris.equation_of_time_minutes(epoch_jde)?;
    Ok(SolarSnapshot {
        epoch_jde,
        declination_rad: eq.dec_rad,
        equation_of_time_min: eot,
    })
}

/// Civil, nautical and astronomical twilight plus sunrise, sunset and
/// transit for the date of the host's simulated time.
///
/// All bands share one solar sample taken at the simulated JDE rounded to
/// the nearest Greenwich noon. Position and size are queried at the
/// matching UT instant, the equation of time at the JDE. The clock is only
/// read.
pub fn compute_daily_twilight<H>(
    host: &H,
    location: &ObserverLocation,
) -> Result<DailyTwilight, SearchError>
where
    H: EphemerisSource + SimulatedClock,
{
    if !location.is_valid() {
        return Err(SearchError::InvalidLocation(
            "latitude must be within [-90, 90] and longitude within [-180, 360]",
        ));
    }

    let epoch_jde = host.simulated_jde().round();
    let delta_t_days = host.simulated_jde() - host.simulated_jd();
    let epoch_jd = epoch_jde - delta_t_days;
    let solar = solar_snapshot(host, epoch_jd, epoch_jde)?;
    let sun = host.resolve(Body::Sun)?;
    let semidiameter_deg = host.angular_size_rad(sun, epoch_jd)?.to_degrees();

    let sunrise_sunset = compute_twilight(-semidiameter_deg, 0.0, location, &solar);

    Ok(DailyTwilight {
        date: CalendarDate::from_jd(epoch_jde)?,
        solar,
        civil: compute_threshold(TwilightThreshold::Civil, location, &solar),
        nautical: compute_threshold(TwilightThreshold::Nautical, location, &solar),
        astronomical: compute_threshold(TwilightThreshold::Astronomical, location, &solar),
        transit_hours: sunrise_sunset.transit_hours,
        sun: sunrise_sunset,
    })
}
