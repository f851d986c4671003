//! Error types for risk aggregation.

use thiserror::Error;

/// A specialized Result type for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk aggregation.
#[derive(Error, Debug, Clone)]
pub enum RiskError {
    /// Confidence level outside the open unit interval.
    #[error("Confidence level must be in (0, 1), got {alpha}")]
    InvalidAlpha {
        /// The rejected confidence level.
        alpha: f64,
    },

    /// The scenario set carries no scenarios.
    #[error("Scenario set is empty")]
    EmptyScenarioSet,

    /// The portfolio carries no positions.
    #[error("Portfolio is empty")]
    EmptyPortfolio,

    /// A ladder instrument has a non-positive maturity.
    #[error("Ladder maturity must be positive, got {maturity}")]
    InvalidMaturity {
        /// The rejected maturity in years.
        maturity: f64,
    },
}
