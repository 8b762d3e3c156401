//! Types for the navigational prediction table.

use navstars_core::{Body, EphemerisError};
use navstars_frames::AzimuthReference;

/// Which twilight crossing the table is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TwilightSide {
    #[default]
    Morning,
    Evening,
}

/// Altitude window for table rows. Bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AltitudeLimit {
    /// −90° … 90°.
    #[default]
    All,
    /// 20° … 90°.
    AboveTwentyDegrees,
    Custom { min_deg: f64, max_deg: f64 },
}

impl AltitudeLimit {
    /// `(min, max)` in degrees.
    pub fn range_deg(self) -> (f64, f64) {
        match self {
            Self::All => (-90.0, 90.0),
            Self::AboveTwentyDegrees => (20.0, 90.0),
            Self::Custom { min_deg, max_deg } => (min_deg, max_deg),
        }
    }

    /// Strict on both ends: altitudes equal to a bound are rejected.
    pub fn contains(self, altitude_deg: f64) -> bool {
        let (min, max) = self.range_deg();
        min < altitude_deg && altitude_deg < max
    }
}

/// Configuration for [`build_prediction_table`](crate::build_prediction_table).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PredictionConfig {
    pub altitude_limit: AltitudeLimit,
    pub azimuth_reference: AzimuthReference,
    pub twilight: TwilightSide,
    /// Evaluate at this JD instead of the computed twilight epoch.
    pub pinned_jd: Option<f64>,
}

impl PredictionConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        let (min, max) = self.altitude_limit.range_deg();
        if !min.is_finite() || !max.is_finite() {
            return Err("altitude limits must be finite");
        }
        if min >= max {
            return Err("minimum altitude must be below maximum altitude");
        }
        if self.pinned_jd.is_some_and(|jd| !jd.is_finite()) {
            return Err("pinned_jd must be finite");
        }
        Ok(())
    }
}

/// One visible body in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    /// Position in evaluation order, counting filtered-out and skipped bodies.
    pub number: usize,
    pub body: Body,
    /// Localized name from the ephemeris source.
    pub label: String,
    /// Planetary symbol, or `"(n)"` with the 1-based star-list position.
    pub designator: String,
    pub magnitude: f64,
    /// Azimuth in degrees [0, 360) in the configured reference.
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    pub declination_deg: f64,
    /// Declination as `"N 12°34.5'"`.
    pub declination_text: String,
}

/// A body omitted from the table because a query failed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBody {
    pub body: Body,
    pub error: EphemerisError,
}

/// Output of the prediction table builder.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionTable {
    /// Greenwich-noon epoch used for the solar sample (JD).
    pub reference_jd: f64,
    /// Epoch the bodies were evaluated at (JD).
    pub evaluation_jd: f64,
    /// UTC hour of the twilight instant, if the nautical altitude is crossed.
    pub twilight_hours: Option<f64>,
    /// Rows in evaluation order: solar-system bodies, then stars.
    pub rows: Vec<PredictionRow>,
    pub skipped: Vec<SkippedBody>,
}
