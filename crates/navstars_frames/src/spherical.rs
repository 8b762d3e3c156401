//! Cartesian ↔ spherical conversion and the ecliptic → equatorial rotation.

use std::f64::consts::TAU;

/// Spherical coordinates in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in radians, range [0, 2π), measured from +x toward +y.
    pub lon_rad: f64,
    /// Latitude in radians, range [-π/2, π/2].
    pub lat_rad: f64,
    /// Distance from the origin, in the unit of the input vector.
    pub radius: f64,
}

/// Equatorial coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    /// Right ascension in radians, [0, 2π).
    pub ra_rad: f64,
    /// Declination in radians, [-π/2, π/2].
    pub dec_rad: f64,
}

impl EquatorialCoords {
    pub fn new(ra_rad: f64, dec_rad: f64) -> Self {
        Self { ra_rad, dec_rad }
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec_rad.to_degrees()
    }
}

impl From<SphericalCoords> for EquatorialCoords {
    fn from(s: SphericalCoords) -> Self {
        Self {
            ra_rad: s.lon_rad,
            dec_rad: s.lat_rad,
        }
    }
}

/// Convert a Cartesian vector to spherical coordinates.
///
/// The zero vector maps to all-zero coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_rad: 0.0,
            lat_rad: 0.0,
            radius: 0.0,
        };
    }

    SphericalCoords {
        lon_rad: y.atan2(x).rem_euclid(TAU),
        lat_rad: (z / r).asin(),
        radius: r,
    }
}

/// Convert spherical coordinates back to a Cartesian vector.
pub fn spherical_to_cartesian(s: &SphericalCoords) -> [f64; 3] {
    let (sin_lat, cos_lat) = s.lat_rad.sin_cos();
    let (sin_lon, cos_lon) = s.lon_rad.sin_cos();
    [
        s.radius * cos_lat * cos_lon,
        s.radius * cos_lat * sin_lon,
        s.radius * sin_lat,
    ]
}

/// Rotate an ecliptic vector into the equatorial frame about the x axis.
pub fn ecliptic_to_equatorial(xyz: &[f64; 3], obliquity_rad: f64) -> [f64; 3] {
    let (s, c) = obliquity_rad.sin_cos();
    [xyz[0], c * xyz[1] - s * xyz[2], s * xyz[1] + c * xyz[2]]
}
