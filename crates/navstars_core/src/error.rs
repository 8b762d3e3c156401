//! Ephemeris-side error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors reported by an [`EphemerisSource`](crate::EphemerisSource).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The source does not know the requested body.
    BodyNotFound(String),
    /// The body is known but cannot be evaluated right now.
    Unavailable { body: String, reason: String },
    /// Opaque failure reported by the embedding host.
    Host(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BodyNotFound(name) => write!(f, "body not found: {name}"),
            Self::Unavailable { body, reason } => {
                write!(f, "{body} unavailable: {reason}")
            }
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl Error for EphemerisError {}
