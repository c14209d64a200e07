//! Error handling for PenPlot core
//!
//! The sampling and interpretation paths never fail on malformed input; the
//! errors here are for the strict helpers (unit parsing, geometry invariants).

use thiserror::Error;

/// Main error type for the core crate
#[derive(Error, Debug)]
pub enum Error {
    /// Unit name not recognised
    #[error("Unknown length unit: {unit}")]
    UnknownUnit {
        /// The unrecognised unit string.
        unit: String,
    },

    /// A length string could not be parsed
    #[error("Invalid length '{input}': {reason}")]
    InvalidLength {
        /// The input that failed to parse.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A stroke needs at least two points
    #[error("Stroke needs at least 2 points, got {points}")]
    DegenerateStroke {
        /// Number of points supplied.
        points: usize,
    },
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
