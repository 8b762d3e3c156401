//! Coordinate helpers for the twilight and prediction computations.
//!
//! Provides Cartesian ↔ spherical conversion, the ecliptic → equatorial
//! rotation, equatorial → horizontal conversion, azimuth reference
//! handling, and degree/decimal-minute angle formatting.

pub mod ddm;
pub mod horizontal;
pub mod spherical;

pub use ddm::{Ddm, HemisphereAxis, deg_to_ddm, format_ddm};
pub use horizontal::{AzimuthReference, HorizontalCoords, equatorial_to_horizontal};
pub use spherical::{
    EquatorialCoords, SphericalCoords, cartesian_to_spherical, ecliptic_to_equatorial,
    spherical_to_cartesian,
};
