//! Newton iteration for the local hour angle at an altitude crossing.
//!
//! Intended for fast movers (the Moon) where a single noon sample is not
//! good enough. The host clock follows the trial epoch so that hosts which
//! only evaluate "now" return positions at the right instant.

use log::{debug, warn};
use navstars_core::{Body, ClockOverride, EphemerisSource, ObserverLocation, SimulatedClock};

use crate::error::SearchError;

/// Sidereal rate of hour-angle change, degrees per hour.
pub const SIDEREAL_RATE_DEG_PER_HOUR: f64 = 15.041_07;

/// Which observer angle enters the altitude residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidualAngle {
    /// The observer's longitude, in radians. Kept for results compatible
    /// with earlier releases.
    #[default]
    Longitude,
    /// The observer's latitude: the spherical-triangle altitude equation.
    Latitude,
}

/// Configuration for [`solve_hour_angle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourAngleSolverConfig {
    /// Starting hour angle, radians (default 1.0).
    pub initial_lha_rad: f64,
    /// Iteration budget (default 10).
    pub max_iterations: u32,
    /// Convergence threshold on |residual| (default 1e-4).
    pub tolerance: f64,
    pub residual_angle: ResidualAngle,
}

impl Default for HourAngleSolverConfig {
    fn default() -> Self {
        Self {
            initial_lha_rad: 1.0,
            max_iterations: 10,
            tolerance: 1e-4,
            residual_angle: ResidualAngle::default(),
        }
    }
}

/// Outcome of the hour-angle iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourAngleSolution {
    /// Last hour-angle estimate, radians.
    pub lha_rad: f64,
    /// Trial epoch of the last estimate (JD).
    pub epoch_jd: f64,
    /// Residual at the last evaluated estimate.
    pub residual: f64,
    /// Number of ephemeris evaluations performed.
    pub iterations: u32,
    /// Whether |residual| dropped below the tolerance. When false the
    /// estimate is best-effort.
    pub converged: bool,
}

/// Iterate the hour angle at which `body` reaches `altitude_deg`.
///
/// Starts from the simulated JDE rounded to the nearest Greenwich noon.
/// The host's simulated time is restored before returning, also on error.
pub fn solve_hour_angle<H>(
    host: &mut H,
    body: Body,
    altitude_deg: f64,
    location: &ObserverLocation,
    config: &HourAngleSolverConfig,
) -> Result<HourAngleSolution, SearchError>
where
    H: EphemerisSource + SimulatedClock,
{
    if config.max_iterations == 0 {
        return Err(SearchError::InvalidConfig("max_iterations must be > 0"));
    }
    if config.tolerance.is_nan() || config.tolerance <= 0.0 {
        return Err(SearchError::InvalidConfig("tolerance must be positive"));
    }

    let mut clock = ClockOverride::new(host);
    let handle = clock.resolve(body)?;

    let angle = match config.residual_angle {
        ResidualAngle::Longitude => location.longitude_rad(),
        ResidualAngle::Latitude => location.latitude_rad(),
    };
    let (sin_a, cos_a) = angle.sin_cos();
    let sin_alt = altitude_deg.to_radians().sin();

    let mut lha = config.initial_lha_rad;
    let mut jd = clock.simulated_jde().round();
    clock.set(jd);

    let mut residual = f64::NAN;
    let mut iterations = 0;
    let mut converged = false;

    for i in 0..config.max_iterations {
        let dec = clock.equatorial(handle, jd)?.dec_rad;
        let (sin_d, cos_d) = dec.sin_cos();
        iterations = i + 1;

        residual = lha.cos() * cos_a * cos_d - sin_alt + sin_a * sin_d;
        if residual.abs() < config.tolerance {
            converged = true;
            break;
        }

        let step = -residual / (cos_a * cos_d * lha.sin());
        if !step.is_finite() {
            break;
        }
        lha += step;
        jd += step / SIDEREAL_RATE_DEG_PER_HOUR / 24.0;
        clock.set(jd);
        debug!(
            "{body}: iteration {i} residual={residual:.3e} step={step:.6} lha={lha:.6} jd={jd:.6}"
        );
    }

    if !converged {
        warn!(
            "{body}: hour angle did not converge after {iterations} iterations (residual {residual:.3e})"
        );
    }

    Ok(HourAngleSolution {
        lha_rad: lha,
        epoch_jd: jd,
        residual,
        iterations,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use navstars_core::solar::SolarModel;

    #[test]
    fn default_config_values() {
        let c = HourAngleSolverConfig::default();
        assert_eq!(c.initial_lha_rad, 1.0);
        assert_eq!(c.max_iterations, 10);
        assert_eq!(c.tolerance, 1e-4);
        assert_eq!(c.residual_angle, ResidualAngle::Longitude);
    }

    #[test]
    fn rejects_zero_iterations() {
        let loc = ObserverLocation::new(52.0, 0.0);
        let mut model = SolarModel::new(loc, 2_460_390.0);
        let config = HourAngleSolverConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let r = solve_hour_angle(&mut model, Body::Sun, -0.83, &loc, &config);
        assert!(matches!(r, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_body_restores_clock() {
        let loc = ObserverLocation::new(52.0, 0.0);
        let mut model = SolarModel::new(loc, 2_460_390.3);
        let r = solve_hour_angle(&mut model, Body::Moon, 0.0, &loc, &Default::default());
        assert!(matches!(r, Err(SearchError::Ephemeris(_))));
        assert_eq!(model.simulated_jd(), 2_460_390.3);
    }

    #[test]
    fn iteration_budget_is_respected() {
        let loc = ObserverLocation::new(52.0, 0.0);
        let mut model = SolarModel::new(loc, 2_460_390.3);
        let config = HourAngleSolverConfig {
            max_iterations: 3,
            residual_angle: ResidualAngle::Latitude,
            ..Default::default()
        };
        let s = solve_hour_angle(&mut model, Body::Sun, -0.83, &loc, &config).unwrap();
        assert!(s.iterations <= 3, "{s:?}");
        assert!(s.residual.is_finite());
        assert_eq!(model.simulated_jd(), 2_460_390.3);
    }

    #[test]
    fn starts_from_rounded_epoch() {
        // Residual at LHA = 1 is far from zero, so the first step moves the epoch
        let loc = ObserverLocation::new(0.0, 0.0);
        let mut model = SolarModel::new(loc, 2_460_390.3);
        let config = HourAngleSolverConfig {
            max_iterations: 1,
            ..Default::default()
        };
        let s = solve_hour_angle(&mut model, Body::Sun, 30.0, &loc, &config).unwrap();
        assert_eq!(s.iterations, 1);
        assert!(!s.converged);
        let expected = 2_460_390.0 + (s.lha_rad - 1.0) / SIDEREAL_RATE_DEG_PER_HOUR / 24.0;
        assert!((s.epoch_jd - expected).abs() < 1e-12);
    }
}
