//! Error types for the collision core
//!
//! Only integration bugs surface as errors: malformed shapes at construction
//! time and edge-unaware hits on shapes that need the struck edge. Degenerate
//! geometry during a tick is reported as `None`, never as an error.

use std::fmt;

/// Errors raised by shape construction and collision resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Interval built with its low end above its high end
    InvertedInterval { low: f64, high: f64 },
    /// Centered interval requested with a negative width
    NegativeWidth(f64),
    /// Rectangle with negative or non-finite dimensions
    InvalidRectangle { width: f64, height: f64 },
    /// Ball radius that is negative or not finite
    InvalidRadius(f64),
    /// Equal division with no parts or an empty interval
    InvalidDivision { parts: usize, length: f64 },
    /// Shrinking an interval by more than half its length
    SpacingTooLarge { spacing: f64, length: f64 },
    /// Edge-dependent shape hit without the struck edge
    MissingCollisionLine,
    /// Tuning could not be parsed or failed validation
    Tuning(String),
    /// Level layout could not be parsed or failed validation
    Layout(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvertedInterval { low, high } => {
                write!(f, "interval low end {} is above high end {}", low, high)
            }
            Error::NegativeWidth(width) => write!(f, "interval width {} is negative", width),
            Error::InvalidRectangle { width, height } => {
                write!(f, "invalid rectangle dimensions {} x {}", width, height)
            }
            Error::InvalidRadius(radius) => write!(f, "invalid ball radius {}", radius),
            Error::InvalidDivision { parts, length } => write!(
                f,
                "cannot divide an interval of length {} into {} parts",
                length, parts
            ),
            Error::SpacingTooLarge { spacing, length } => write!(
                f,
                "spacing {} cannot fit inside an interval of length {}",
                spacing, length
            ),
            Error::MissingCollisionLine => write!(
                f,
                "cannot calculate velocity after hit without the collision line"
            ),
            Error::Tuning(msg) => write!(f, "invalid tuning: {}", msg),
            Error::Layout(msg) => write!(f, "invalid level layout: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Tuning(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
