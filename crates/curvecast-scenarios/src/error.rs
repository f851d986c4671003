//! Error types for scenario generation.

use thiserror::Error;

/// A specialized Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur during scenario generation.
#[derive(Error, Debug, Clone)]
pub enum ScenarioError {
    /// A scenario count of zero was requested.
    #[error("Scenario count must be positive")]
    ZeroScenarios,

    /// The change series is not aligned with the base curve's grid.
    #[error("Change grid has {changes} tenors, base curve has {base}")]
    GridMismatch {
        /// Tenor count of the change series.
        changes: usize,
        /// Tenor count of the base curve.
        base: usize,
    },

    /// Every generated scenario produced non-finite yields.
    #[error("All {requested} generated scenarios were dropped as non-finite")]
    AllDropped {
        /// Number of scenarios requested.
        requested: usize,
    },

    /// Too few factor scores to estimate score variances.
    #[error("Factor-space sampling needs at least {required} score rows, got {actual}")]
    InsufficientScores {
        /// Minimum required score rows.
        required: usize,
        /// Actual score rows.
        actual: usize,
    },

    /// An underlying numerical routine rejected its input.
    #[error("Numerical error: {0}")]
    Math(#[from] curvecast_math::MathError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScenarioError::AllDropped { requested: 100 };
        assert!(err.to_string().contains("100"));
    }
}
