//! Portfolio of tenor-level rate exposures.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A single DV01-equivalent exposure at a curve tenor.
///
/// `sensitivity` is the signed currency P&L of a 1-unit (100%) yield move
/// at `tenor`; positive exposure loses value when yields rise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Tenor of the exposure, in years. Mapped to the nearest grid tenor
    /// when it falls between curve points.
    pub tenor: f64,
    /// Signed dollar sensitivity to a 1-unit yield move.
    pub sensitivity: f64,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub fn new(tenor: f64, sensitivity: f64) -> Self {
        Self {
            tenor,
            sensitivity,
        }
    }
}

/// A static set of positions. Input to the risk engine, never derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Creates a portfolio from positions.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty position list or any non-finite field.
    pub fn new(positions: Vec<Position>) -> CoreResult<Self> {
        if positions.is_empty() {
            return Err(CoreError::empty("portfolio"));
        }
        for p in &positions {
            if !p.tenor.is_finite() || !p.sensitivity.is_finite() {
                return Err(CoreError::invalid_config(format!(
                    "non-finite position: tenor={}, sensitivity={}",
                    p.tenor, p.sensitivity
                )));
            }
        }
        Ok(Self { positions })
    }

    /// Creates a single-position portfolio.
    pub fn single(tenor: f64, sensitivity: f64) -> CoreResult<Self> {
        Self::new(vec![Position::new(tenor, sensitivity)])
    }

    /// Returns the positions.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when the portfolio has no positions. Validated portfolios never do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_construction() {
        let p = Portfolio::new(vec![
            Position::new(2.0, 15_000.0),
            Position::new(10.0, -4_000.0),
        ])
        .unwrap();
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Portfolio::new(vec![]).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Portfolio::new(vec![Position::new(2.0, f64::NAN)]).is_err());
    }
}
