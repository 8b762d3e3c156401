//! Prediction table configuration file support.
//!
//! Reads the NavStars settings from TOML. Every field is optional:
//!
//! ```toml
//! star_set = "AngloAmerican"        # or "Custom" together with custom_stars
//! custom_stars = [677, 2081]
//!
//! [prediction]
//! altitude_limit = "All"            # "All" | "AboveTwentyDegrees" | "Custom"
//! min_altitude_deg = -90.0          # only read for "Custom"
//! max_altitude_deg = 90.0
//! azimuth_reference = "South"       # "South" | "North"
//! twilight = "Morning"              # "Morning" | "Evening"
//! pinned_jd = 2460000.5
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use navstars_frames::AzimuthReference;
use navstars_search::{AltitudeLimit, PredictionConfig, StarSet, TwilightSide};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Key selecting a user-supplied star list.
pub const CUSTOM_STAR_SET: &str = "Custom";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavStarsConfig {
    #[serde(default = "default_star_set")]
    pub star_set: String,
    #[serde(default)]
    pub custom_stars: Vec<u32>,
    #[serde(default)]
    pub prediction: PredictionSettings,
}

/// `[prediction]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSettings {
    #[serde(default)]
    pub altitude_limit: AltitudeLimitSetting,
    #[serde(default = "default_min_altitude")]
    pub min_altitude_deg: f64,
    #[serde(default = "default_max_altitude")]
    pub max_altitude_deg: f64,
    #[serde(default)]
    pub azimuth_reference: AzimuthSetting,
    #[serde(default)]
    pub twilight: TwilightSetting,
    #[serde(default)]
    pub pinned_jd: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AltitudeLimitSetting {
    #[default]
    All,
    AboveTwentyDegrees,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AzimuthSetting {
    #[default]
    South,
    North,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TwilightSetting {
    #[default]
    Morning,
    Evening,
}

fn default_star_set() -> String {
    StarSet::default().key().to_string()
}

fn default_min_altitude() -> f64 {
    -90.0
}

fn default_max_altitude() -> f64 {
    90.0
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            altitude_limit: AltitudeLimitSetting::default(),
            min_altitude_deg: default_min_altitude(),
            max_altitude_deg: default_max_altitude(),
            azimuth_reference: AzimuthSetting::default(),
            twilight: TwilightSetting::default(),
            pinned_jd: None,
        }
    }
}

impl Default for NavStarsConfig {
    fn default() -> Self {
        Self {
            star_set: default_star_set(),
            custom_stars: Vec::new(),
            prediction: PredictionSettings::default(),
        }
    }
}

impl NavStarsConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        content.parse()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.star_numbers()?;

        if self.prediction.altitude_limit == AltitudeLimitSetting::Custom {
            let (min_deg, max_deg) = (
                self.prediction.min_altitude_deg,
                self.prediction.max_altitude_deg,
            );
            let in_range = |v: f64| (-90.0..=90.0).contains(&v);
            if !in_range(min_deg) || !in_range(max_deg) || min_deg >= max_deg {
                return Err(ConfigError::InvalidAltitudeRange { min_deg, max_deg });
            }
        }

        if let Some(jd) = self.prediction.pinned_jd.filter(|jd| !jd.is_finite()) {
            return Err(ConfigError::InvalidPinnedJd(jd));
        }
        Ok(())
    }

    /// Settings for [`navstars_search::build_prediction_table`].
    pub fn prediction_config(&self) -> PredictionConfig {
        let p = &self.prediction;
        PredictionConfig {
            altitude_limit: match p.altitude_limit {
                AltitudeLimitSetting::All => AltitudeLimit::All,
                AltitudeLimitSetting::AboveTwentyDegrees => AltitudeLimit::AboveTwentyDegrees,
                AltitudeLimitSetting::Custom => AltitudeLimit::Custom {
                    min_deg: p.min_altitude_deg,
                    max_deg: p.max_altitude_deg,
                },
            },
            azimuth_reference: match p.azimuth_reference {
                AzimuthSetting::South => AzimuthReference::South,
                AzimuthSetting::North => AzimuthReference::North,
            },
            twilight: match p.twilight {
                TwilightSetting::Morning => TwilightSide::Morning,
                TwilightSetting::Evening => TwilightSide::Evening,
            },
            pinned_jd: p.pinned_jd,
        }
    }

    /// Hipparcos numbers of the configured stars, in evaluation order.
    pub fn star_numbers(&self) -> Result<Vec<u32>, ConfigError> {
        if self.star_set == CUSTOM_STAR_SET {
            if self.custom_stars.is_empty() {
                return Err(ConfigError::EmptyStarList);
            }
            return Ok(self.custom_stars.clone());
        }
        StarSet::from_key(&self.star_set)
            .map(StarSet::hip_numbers)
            .ok_or_else(|| ConfigError::UnknownStarSet(self.star_set.clone()))
    }
}

impl FromStr for NavStarsConfig {
    type Err = ConfigError;

    /// Parse and validate TOML text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
