//! Error types for calendar parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar input handling.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar date string could not be parsed or is out of range.
    InvalidDate(String),
    /// A Julian Date was NaN or infinite.
    NonFiniteJd,
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::NonFiniteJd => write!(f, "Julian Date must be finite"),
        }
    }
}

impl Error for TimeError {}
