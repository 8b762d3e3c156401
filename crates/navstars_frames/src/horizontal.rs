//! Equatorial → horizontal conversion and azimuth reference handling.

use std::f64::consts::TAU;

use navstars_time::wrap_degrees;

/// Horizontal (alt-azimuth) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoords {
    /// Azimuth in radians, [0, 2π), measured from north through east.
    pub azimuth_rad: f64,
    /// Altitude above the geometric horizon in radians.
    pub altitude_rad: f64,
}

impl HorizontalCoords {
    pub fn new(azimuth_rad: f64, altitude_rad: f64) -> Self {
        Self {
            azimuth_rad,
            altitude_rad,
        }
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_rad.to_degrees()
    }

    pub fn altitude_deg(&self) -> f64 {
        self.altitude_rad.to_degrees()
    }
}

/// Convert hour angle and declination to horizontal coordinates.
///
/// `hour_angle_rad` is measured westward from the meridian.
pub fn equatorial_to_horizontal(
    hour_angle_rad: f64,
    dec_rad: f64,
    latitude_rad: f64,
) -> HorizontalCoords {
    let (sin_h, cos_h) = hour_angle_rad.sin_cos();
    let (sin_d, cos_d) = dec_rad.sin_cos();
    let (sin_p, cos_p) = latitude_rad.sin_cos();

    let sin_alt = (sin_p * sin_d + cos_p * cos_d * cos_h).clamp(-1.0, 1.0);
    let altitude = sin_alt.asin();

    // Azimuth from north, eastward
    let y = -cos_d * sin_h;
    let x = sin_d * cos_p - cos_d * cos_h * sin_p;
    let azimuth = y.atan2(x).rem_euclid(TAU);

    HorizontalCoords::new(azimuth, altitude)
}

/// Origin used when presenting azimuths in the prediction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AzimuthReference {
    /// South-based: `(180° − az) mod 360°`.
    #[default]
    South,
    /// North-based, as delivered by the ephemeris: `az mod 360°`.
    North,
}

impl AzimuthReference {
    /// Convert a north-based azimuth in degrees to this reference, in [0, 360).
    pub fn apply(self, azimuth_deg: f64) -> f64 {
        match self {
            Self::South => wrap_degrees(180.0 - azimuth_deg),
            Self::North => wrap_degrees(azimuth_deg),
        }
    }
}
