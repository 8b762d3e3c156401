//! Twilight and navigational prediction computations.
//!
//! This crate provides:
//! - The linearized twilight calculator (civil, nautical, astronomical,
//!   sunrise/sunset, transit) and the daily twilight summary
//! - An iterative hour-angle solver for rise/set of fast-moving bodies
//! - The prediction table builder for Sun, Moon, planets and navigational stars
//! - Column ordering for prediction rows and the built-in star sets

pub mod error;
pub mod ordering;
pub mod prediction;
pub mod prediction_types;
pub mod riseset;
pub mod star_sets;
pub mod twilight;
pub mod twilight_types;

pub use error::SearchError;
pub use ordering::{PredictionColumn, compare_rows, sort_rows};
pub use prediction::build_prediction_table;
pub use prediction_types::{
    AltitudeLimit, PredictionConfig, PredictionRow, PredictionTable, SkippedBody, TwilightSide,
};
pub use riseset::{
    HourAngleSolution, HourAngleSolverConfig, ResidualAngle, SIDEREAL_RATE_DEG_PER_HOUR,
    solve_hour_angle,
};
pub use star_sets::{ANGLO_AMERICAN, NavStar, StarSet, star_name};
pub use twilight::{
    compute_daily_twilight, compute_threshold, compute_twilight, event_hour_angle,
    hour_angle_cosine, max_twilight_duration_minutes, solar_snapshot,
};
pub use twilight_types::{DailyTwilight, SolarSnapshot, TwilightResult, TwilightThreshold};
