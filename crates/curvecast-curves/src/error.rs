//! Error types for curve fitting and change series construction.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur during curve fitting or differencing.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Too few tenor points on a date for a stable fit.
    #[error("Insufficient points for fit: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Too few snapshots to derive day-over-day changes.
    #[error("Insufficient history: need at least {required} snapshots, got {actual}")]
    InsufficientHistory {
        /// Minimum required snapshots.
        required: usize,
        /// Actual number of snapshots.
        actual: usize,
    },

    /// Every snapshot pair had a tenor gap; no change row survived.
    #[error("No complete change row across {pairs} snapshot pairs")]
    NoCompleteRows {
        /// Number of consecutive-day pairs examined.
        pairs: usize,
    },

    /// No date in the history produced a usable fit.
    #[error("No Nelson-Siegel fit succeeded over {dates} dates")]
    AllFitsFailed {
        /// Number of dates attempted.
        dates: usize,
    },

    /// Snapshots are not in ascending date order.
    #[error("History not date-ordered: {previous} followed by {current}")]
    HistoryNotOrdered {
        /// Date at position i - 1.
        previous: chrono::NaiveDate,
        /// Date at position i.
        current: chrono::NaiveDate,
    },

    /// An underlying numerical routine rejected its input.
    #[error("Numerical error: {0}")]
    Math(#[from] curvecast_math::MathError),

    /// A domain type rejected its construction input.
    #[error("Invalid curve data: {0}")]
    Core(#[from] curvecast_core::CoreError),
}

impl CurveError {
    /// Creates an insufficient-points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::insufficient_points(4, 3);
        assert!(err.to_string().contains("at least 4"));
    }
}
