//! Types for the twilight calculator.

use navstars_time::CalendarDate;

/// Named twilight band.
///
/// Each band is described by its mean solar altitude and its full width.
/// The mean altitude is the target of the linearized calculation; the width
/// only bounds the maximum possible duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwilightThreshold {
    /// −0.83333° … −6°, mean −3.41667°.
    Civil,
    /// −6° … −12°, mean −9°.
    Nautical,
    /// −12° … −18°, mean −15°.
    Astronomical,
}

impl TwilightThreshold {
    pub const ALL: [Self; 3] = [Self::Civil, Self::Nautical, Self::Astronomical];

    /// Mean solar altitude of the band, degrees.
    pub const fn altitude_deg(self) -> f64 {
        match self {
            Self::Civil => -3.416_666_67,
            Self::Nautical => -9.0,
            Self::Astronomical => -15.0,
        }
    }

    /// Full band width, degrees.
    pub const fn band_deg(self) -> f64 {
        match self {
            Self::Civil => 5.166_666_67,
            Self::Nautical => 6.0,
            Self::Astronomical => 6.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Civil => "civil",
            Self::Nautical => "nautical",
            Self::Astronomical => "astronomical",
        }
    }
}

/// Solar inputs to the twilight calculator, sampled at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSnapshot {
    /// Epoch the inputs were sampled at (JDE, rounded to Greenwich noon).
    pub epoch_jde: f64,
    /// Apparent solar declination in radians.
    pub declination_rad: f64,
    /// Equation of time in minutes (apparent − mean).
    pub equation_of_time_min: f64,
}

/// Twilight times for one threshold.
///
/// `None` means the threshold altitude is not crossed on this date at this
/// latitude. The two polar cases (never above, never below) are not told
/// apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwilightResult {
    /// Morning crossing, fractional UTC hours in [0, 24).
    pub morning_hours: Option<f64>,
    /// Evening crossing, fractional UTC hours in [0, 24).
    pub evening_hours: Option<f64>,
    /// Linearized duration of the band, minutes.
    pub duration_minutes: Option<f64>,
    /// Solar transit, fractional UTC hours in [0, 24).
    pub transit_hours: f64,
    /// Hour angle magnitude at the crossing, radians.
    pub event_hour_angle_rad: Option<f64>,
}

impl TwilightResult {
    pub fn has_event(&self) -> bool {
        self.event_hour_angle_rad.is_some()
    }
}

/// All twilight bands, sunrise, sunset and transit for one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTwilight {
    /// Calendar date of the reference epoch.
    pub date: CalendarDate,
    /// Solar inputs used for every band.
    pub solar: SolarSnapshot,
    pub civil: TwilightResult,
    pub nautical: TwilightResult,
    pub astronomical: TwilightResult,
    /// Sunrise and sunset: upper limb on the geometric horizon, zero duration.
    pub sun: TwilightResult,
    pub transit_hours: f64,
}

impl DailyTwilight {
    pub fn band(&self, threshold: TwilightThreshold) -> &TwilightResult {
        match threshold {
            TwilightThreshold::Civil => &self.civil,
            TwilightThreshold::Nautical => &self.nautical,
            TwilightThreshold::Astronomical => &self.astronomical,
        }
    }
}
