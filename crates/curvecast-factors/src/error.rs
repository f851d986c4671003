//! Error types for factor extraction.

use thiserror::Error;

/// A specialized Result type for factor operations.
pub type FactorResult<T> = Result<T, FactorError>;

/// Errors that can occur during factor extraction.
#[derive(Error, Debug, Clone)]
pub enum FactorError {
    /// Too few change rows to estimate a covariance matrix.
    #[error("Insufficient change rows: need at least {required}, got {actual}")]
    InsufficientRows {
        /// Minimum required rows.
        required: usize,
        /// Actual number of rows.
        actual: usize,
    },

    /// Requested component count outside `1..=K`.
    #[error("Component count {requested} invalid for {tenors} tenors")]
    InvalidComponentCount {
        /// Requested component count.
        requested: usize,
        /// Number of tenor columns.
        tenors: usize,
    },

    /// An underlying numerical routine rejected its input.
    #[error("Numerical error: {0}")]
    Math(#[from] curvecast_math::MathError),
}
