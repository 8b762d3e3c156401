//! Low-precision solar ephemeris (Meeus, *Astronomical Algorithms*, ch. 25 and 28).
//!
//! Accurate to about 0.01° in position and a few seconds in the equation
//! of time, which is well below the minute-level resolution of the
//! linearized twilight model. Only the Sun is known; every other body
//! resolves to [`EphemerisError::BodyNotFound`].

use navstars_frames::{
    EquatorialCoords, HorizontalCoords, cartesian_to_spherical, ecliptic_to_equatorial,
    equatorial_to_horizontal,
};
use navstars_time::{julian_centuries, local_sidereal_time_deg, wrap_degrees};

use crate::{Body, EphemerisError, EphemerisSource, ObserverLocation, SimulatedClock};

/// Apparent visual magnitude of the Sun.
pub const SUN_MAGNITUDE: f64 = -26.74;

/// Solar semidiameter at 1 AU, arcseconds.
const SUN_SEMIDIAMETER_1AU_ARCSEC: f64 = 959.63;

/// Geometric and apparent solar quantities at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent right ascension and declination of date.
    pub equatorial: EquatorialCoords,
    /// Apparent ecliptic longitude in degrees, [0, 360).
    pub apparent_longitude_deg: f64,
    /// Earth–Sun distance in AU.
    pub distance_au: f64,
    /// Apparent minus mean solar time, minutes.
    pub equation_of_time_min: f64,
}

/// Compute the Sun's apparent position at `jde`.
pub fn solar_position(jde: f64) -> SolarPosition {
    let t = julian_centuries(jde);

    let l0 = wrap_degrees((280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t) % 360.0);
    let m = wrap_degrees((357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t) % 360.0);
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let m_rad = m.to_radians();
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();
    let true_longitude = l0 + center;
    let anomaly = (m + center).to_radians();
    let distance_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * anomaly.cos());

    let omega = (125.04 - 1_934.136 * t).to_radians();
    let lambda = wrap_degrees(true_longitude - 0.005_69 - 0.004_78 * omega.sin());

    let eps0 = 23.439_291_1 - 0.013_004_166_7 * t - 1.638_9e-7 * t * t + 5.036_1e-7 * t * t * t;
    let eps = (eps0 + 0.002_56 * omega.cos()).to_radians();

    let lambda_rad = lambda.to_radians();
    let ecliptic = [lambda_rad.cos(), lambda_rad.sin(), 0.0];
    let equatorial: EquatorialCoords =
        cartesian_to_spherical(&ecliptic_to_equatorial(&ecliptic, eps)).into();

    // Meeus eq. 28.3
    let y = (eps / 2.0).tan().powi(2);
    let l0_rad = l0.to_radians();
    let eot_rad = y * (2.0 * l0_rad).sin() - 2.0 * e * m_rad.sin()
        + 4.0 * e * y * m_rad.sin() * (2.0 * l0_rad).cos()
        - 0.5 * y * y * (4.0 * l0_rad).sin()
        - 1.25 * e * e * (2.0 * m_rad).sin();

    SolarPosition {
        equatorial,
        apparent_longitude_deg: lambda,
        distance_au,
        equation_of_time_min: eot_rad.to_degrees() * 4.0,
    }
}

/// Handle for the only body [`SolarModel`] knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunHandle;

/// Stand-alone ephemeris and clock for running without a host.
///
/// JD and JDE are treated as equal; ΔT is below the model's resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarModel {
    location: ObserverLocation,
    jd: f64,
}

impl SolarModel {
    pub fn new(location: ObserverLocation, jd: f64) -> Self {
        Self { location, jd }
    }

    pub fn location(&self) -> ObserverLocation {
        self.location
    }
}

impl SimulatedClock for SolarModel {
    fn simulated_jd(&self) -> f64 {
        self.jd
    }

    fn set_simulated_jd(&mut self, jd: f64) {
        self.jd = jd;
    }
}

impl EphemerisSource for SolarModel {
    type Handle = SunHandle;

    fn resolve(&self, body: Body) -> Result<SunHandle, EphemerisError> {
        match body {
            Body::Sun => Ok(SunHandle),
            other => Err(EphemerisError::BodyNotFound(other.to_string())),
        }
    }

    fn equatorial(&self, _: SunHandle, epoch_jd: f64) -> Result<EquatorialCoords, EphemerisError> {
        Ok(solar_position(epoch_jd).equatorial)
    }

    fn horizontal(&self, _: SunHandle, epoch_jd: f64) -> Result<HorizontalCoords, EphemerisError> {
        let eq = solar_position(epoch_jd).equatorial;
        let lst = local_sidereal_time_deg(epoch_jd, self.location.longitude_deg);
        let hour_angle = (lst - eq.ra_rad.to_degrees()).to_radians();
        Ok(equatorial_to_horizontal(
            hour_angle,
            eq.dec_rad,
            self.location.latitude_rad(),
        ))
    }

    fn magnitude(&self, _: SunHandle, _: f64) -> Result<f64, EphemerisError> {
        Ok(SUN_MAGNITUDE)
    }

    fn angular_size_rad(&self, _: SunHandle, epoch_jd: f64) -> Result<f64, EphemerisError> {
        let r = solar_position(epoch_jd).distance_au;
        Ok((SUN_SEMIDIAMETER_1AU_ARCSEC / r / 3600.0).to_radians())
    }

    fn equation_of_time_minutes(&self, epoch_jde: f64) -> Result<f64, EphemerisError> {
        Ok(solar_position(epoch_jde).equation_of_time_min)
    }

    fn localized_name(&self, _: SunHandle) -> String {
        "Sun".to_string()
    }
}
