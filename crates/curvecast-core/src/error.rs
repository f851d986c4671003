//! Error types for core domain objects.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building core domain objects.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Tenor and yield vectors have different lengths.
    #[error("Curve has {tenors} tenors but {yields} yields")]
    LengthMismatch {
        /// Number of tenor points.
        tenors: usize,
        /// Number of yield points.
        yields: usize,
    },

    /// Tenors are not strictly increasing.
    #[error("Tenors not strictly increasing at index {index}: {previous} >= {current}")]
    TenorsNotIncreasing {
        /// Index of the offending tenor.
        index: usize,
        /// Tenor at index - 1.
        previous: f64,
        /// Tenor at index.
        current: f64,
    },

    /// A yield observation is NaN or infinite.
    #[error("Non-finite yield at tenor {tenor}")]
    NonFiniteYield {
        /// The tenor carrying the bad observation.
        tenor: f64,
    },

    /// A yield observation is outside the plausible market band.
    #[error("Yield {value} at tenor {tenor} outside plausible band [{min}, {max}]")]
    ImplausibleYield {
        /// The tenor carrying the observation.
        tenor: f64,
        /// The observed decimal yield.
        value: f64,
        /// Lower edge of the band.
        min: f64,
        /// Upper edge of the band.
        max: f64,
    },

    /// Empty input where at least one element is required.
    #[error("Empty {what}")]
    Empty {
        /// Description of the empty collection.
        what: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the invalid value.
        reason: String,
    },
}

impl CoreError {
    /// Creates an empty-input error.
    #[must_use]
    pub fn empty(what: impl Into<String>) -> Self {
        Self::Empty { what: what.into() }
    }

    /// Creates an invalid-configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
