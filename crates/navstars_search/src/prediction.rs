//! Navigational prediction table.
//!
//! Evaluates the Sun, Moon, the four navigational planets and a list of
//! catalog stars at the nautical twilight instant, and keeps the bodies
//! inside the configured altitude window.

use log::{debug, warn};
use navstars_core::{
    Body, ClockOverride, EphemerisError, EphemerisSource, ObserverLocation, SOLAR_SYSTEM_BODIES,
    SimulatedClock,
};
use navstars_frames::{AzimuthReference, HemisphereAxis, format_ddm};
use navstars_time::{DEG_PER_HOUR, wrap_hours};

use crate::error::SearchError;
use crate::prediction_types::{
    PredictionConfig, PredictionRow, PredictionTable, SkippedBody, TwilightSide,
};
use crate::twilight::{event_hour_angle, solar_snapshot};
use crate::twilight_types::TwilightThreshold;

/// One body to evaluate, with its designator.
fn evaluation_list(stars: &[u32]) -> Vec<(Body, String)> {
    let solar = SOLAR_SYSTEM_BODIES
        .iter()
        .map(|b| (*b, b.symbol().unwrap_or_default().to_string()));
    let catalog = stars
        .iter()
        .enumerate()
        .map(|(i, hip)| (Body::Star(*hip), format!("({})", i + 1)));
    solar.chain(catalog).collect()
}

/// UTC hour of the nautical crossing on `side`, without the duration term.
///
/// Falls back to the transit when the nautical altitude is not crossed.
fn twilight_hours(
    location: &ObserverLocation,
    declination_rad: f64,
    eot_min: f64,
    side: TwilightSide,
) -> (f64, Option<f64>) {
    let transit = 12.0 - eot_min / 60.0 - location.longitude_deg / DEG_PER_HOUR;
    let lha = event_hour_angle(
        TwilightThreshold::Nautical.altitude_deg().to_radians(),
        location.latitude_rad(),
        declination_rad,
    );
    let lha_hours = lha.unwrap_or(0.0).to_degrees() / DEG_PER_HOUR;
    let t = match side {
        TwilightSide::Morning => transit - lha_hours,
        TwilightSide::Evening => transit + lha_hours,
    };
    let t = wrap_hours(t);
    (t, lha.map(|_| t))
}

fn evaluate_body<E: EphemerisSource>(
    ephemeris: &E,
    body: Body,
    epoch_jd: f64,
    azimuth_reference: AzimuthReference,
) -> Result<(String, f64, f64, f64, f64), EphemerisError> {
    let handle = ephemeris.resolve(body)?;
    let label = ephemeris.localized_name(handle);
    let magnitude = ephemeris.magnitude(handle, epoch_jd)?;
    let horizontal = ephemeris.horizontal(handle, epoch_jd)?;
    let equatorial = ephemeris.equatorial(handle, epoch_jd)?;
    Ok((
        label,
        magnitude,
        azimuth_reference.apply(horizontal.azimuth_deg()),
        horizontal.altitude_deg(),
        equatorial.dec_deg(),
    ))
}

/// Build the prediction table for the host's current simulated date.
///
/// The host clock is moved to the nearest Greenwich noon for the solar
/// sample, then to the twilight epoch for the body queries, and restored
/// (followed by [`SimulatedClock::refresh`]) before returning, on every
/// exit path.
///
/// A body whose queries fail is left out and listed in
/// [`PredictionTable::skipped`]. Only a failure to sample the Sun at the
/// reference epoch is returned as an error.
pub fn build_prediction_table<H>(
    host: &mut H,
    location: &ObserverLocation,
    stars: &[u32],
    config: &PredictionConfig,
) -> Result<PredictionTable, SearchError>
where
    H: EphemerisSource + SimulatedClock,
{
    if !location.is_valid() {
        return Err(SearchError::InvalidLocation(
            "latitude must be within [-90, 90] and longitude within [-180, 360]",
        ));
    }
    config.validate().map_err(SearchError::InvalidConfig)?;

    let mut clock = ClockOverride::new(host).with_refresh();

    let reference_jd = clock.saved_jd().round();
    clock.set(reference_jd);
    let solar = solar_snapshot(&*clock, reference_jd, clock.simulated_jde())?;

    let (hours, twilight_hours) = twilight_hours(
        location,
        solar.declination_rad,
        solar.equation_of_time_min,
        config.twilight,
    );
    let evaluation_jd = config
        .pinned_jd
        .unwrap_or(reference_jd + (hours - 12.0) / 24.0);
    debug!(
        "prediction: reference jd {reference_jd}, twilight {hours:.4} h, evaluation jd {evaluation_jd:.6}"
    );
    clock.set(evaluation_jd);

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (number, (body, designator)) in evaluation_list(stars).into_iter().enumerate() {
        match evaluate_body(&*clock, body, evaluation_jd, config.azimuth_reference) {
            Ok((label, magnitude, azimuth_deg, altitude_deg, declination_deg)) => {
                if !config.altitude_limit.contains(altitude_deg) {
                    continue;
                }
                rows.push(PredictionRow {
                    number,
                    body,
                    label,
                    designator,
                    magnitude,
                    azimuth_deg,
                    altitude_deg,
                    declination_deg,
                    declination_text: format_ddm(declination_deg, HemisphereAxis::NorthSouth),
                });
            }
            Err(error) => {
                warn!("prediction: skipping {body}: {error}");
                skipped.push(SkippedBody { body, error });
            }
        }
    }

    Ok(PredictionTable {
        reference_jd,
        evaluation_jd,
        twilight_hours,
        rows,
        skipped,
    })
}
