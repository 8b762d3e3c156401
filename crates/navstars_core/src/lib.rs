//! Body model and host contracts for the NavStars computations.
//!
//! The twilight and prediction code never talks to a concrete ephemeris.
//! It is generic over two traits implemented by the embedding host:
//!
//! - [`EphemerisSource`] resolves [`Body`] values to host handles and
//!   answers position, magnitude, size and equation-of-time queries.
//! - [`SimulatedClock`] exposes the host's shared "current simulated time".
//!
//! Every temporary change of the simulated time goes through
//! [`ClockOverride`], which restores the saved epoch when dropped.
//! [`solar::SolarModel`] is a self-contained implementation of both traits
//! that knows only the Sun.

use std::fmt::{Display, Formatter};

pub mod clock;
pub mod error;
pub mod solar;

pub use clock::{ClockOverride, SimulatedClock};
pub use error::EphemerisError;
pub use navstars_frames::{EquatorialCoords, HorizontalCoords};

/// Bodies that can appear in a prediction table.
///
/// Catalog stars are keyed by Hipparcos number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Star(u32),
}

/// Solar-system bodies in the order they are evaluated.
pub const SOLAR_SYSTEM_BODIES: [Body; 6] = [
    Body::Sun,
    Body::Moon,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
];

/// Kind code used for catalog stars in [`Body::code`].
pub const STAR_CODE: i32 = 0;

impl Body {
    /// NAIF-style body code; catalog stars all map to [`STAR_CODE`].
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 10,
            Self::Moon => 301,
            Self::Venus => 299,
            Self::Mars => 499,
            Self::Jupiter => 599,
            Self::Saturn => 699,
            Self::Star(_) => STAR_CODE,
        }
    }

    /// Build a body from a code and, for stars, a Hipparcos number.
    pub const fn from_code(code: i32, hip: u32) -> Option<Self> {
        match code {
            10 => Some(Self::Sun),
            301 => Some(Self::Moon),
            299 => Some(Self::Venus),
            499 => Some(Self::Mars),
            599 => Some(Self::Jupiter),
            699 => Some(Self::Saturn),
            STAR_CODE if hip > 0 => Some(Self::Star(hip)),
            _ => None,
        }
    }

    /// Hipparcos number for catalog stars.
    pub const fn hip(self) -> Option<u32> {
        match self {
            Self::Star(hip) => Some(hip),
            _ => None,
        }
    }

    /// Planetary symbol used as the row designator.
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Self::Sun => Some("☉"),
            Self::Moon => Some("☾"),
            Self::Venus => Some("♀"),
            Self::Mars => Some("♂"),
            Self::Jupiter => Some("♃"),
            Self::Saturn => Some("♄"),
            Self::Star(_) => None,
        }
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sun => f.write_str("Sun"),
            Self::Moon => f.write_str("Moon"),
            Self::Venus => f.write_str("Venus"),
            Self::Mars => f.write_str("Mars"),
            Self::Jupiter => f.write_str("Jupiter"),
            Self::Saturn => f.write_str("Saturn"),
            Self::Star(hip) => write!(f, "HIP {hip}"),
        }
    }
}

/// Geographic observer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverLocation {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
}

impl ObserverLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Latitude within [-90, 90] and longitude within [-180, 360], both finite.
    pub fn is_valid(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && (-90.0..=90.0).contains(&self.latitude_deg)
            && (-180.0..=360.0).contains(&self.longitude_deg)
    }
}

/// Ephemeris queries answered by the host.
///
/// Epochs are Julian Dates (UT), except for
/// [`equation_of_time_minutes`](Self::equation_of_time_minutes), which takes
/// a Julian Ephemeris Date. Hosts whose API only evaluates "now" may ignore
/// the epoch argument; callers always set the simulated clock to the same
/// instant before querying.
pub trait EphemerisSource {
    /// Stable lookup key for a resolved body.
    type Handle: Copy;

    fn resolve(&self, body: Body) -> Result<Self::Handle, EphemerisError>;

    /// Apparent right ascension and declination of date.
    fn equatorial(
        &self,
        handle: Self::Handle,
        epoch_jd: f64,
    ) -> Result<EquatorialCoords, EphemerisError>;

    /// Azimuth (north-based, eastward) and altitude for the host's observer.
    fn horizontal(
        &self,
        handle: Self::Handle,
        epoch_jd: f64,
    ) -> Result<HorizontalCoords, EphemerisError>;

    fn magnitude(&self, handle: Self::Handle, epoch_jd: f64) -> Result<f64, EphemerisError>;

    /// Apparent angular radius in radians.
    fn angular_size_rad(&self, handle: Self::Handle, epoch_jd: f64)
    -> Result<f64, EphemerisError>;

    /// Apparent minus mean solar time, in minutes.
    fn equation_of_time_minutes(&self, epoch_jde: f64) -> Result<f64, EphemerisError>;

    fn localized_name(&self, handle: Self::Handle) -> String;
}
