//! Configuration error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// The TOML text is malformed or has fields of the wrong type.
    Parse(String),
    UnknownStarSet(String),
    InvalidAltitudeRange { min_deg: f64, max_deg: f64 },
    /// `star_set = "Custom"` without any `custom_stars`.
    EmptyStarList,
    InvalidPinnedJd(f64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "failed to read config file: {msg}"),
            Self::Parse(msg) => write!(f, "failed to parse config file: {msg}"),
            Self::UnknownStarSet(key) => write!(f, "unknown star set: {key}"),
            Self::InvalidAltitudeRange { min_deg, max_deg } => write!(
                f,
                "invalid altitude range: need -90 <= min < max <= 90, got {min_deg}..{max_deg}"
            ),
            Self::EmptyStarList => write!(f, "custom star set has no stars"),
            Self::InvalidPinnedJd(jd) => write!(f, "pinned_jd must be finite, got {jd}"),
        }
    }
}

impl Error for ConfigError {}
