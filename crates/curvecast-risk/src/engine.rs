//! Scenario P&L distribution and tail metrics.

use serde::{Deserialize, Serialize};

use curvecast_core::types::Portfolio;
use curvecast_scenarios::generator::ScenarioSet;

use crate::error::{RiskError, RiskResult};

/// Tail-risk metrics over a scenario P&L distribution.
///
/// `var` and `es` are loss magnitudes in currency units: positive numbers
/// for losses, negative when even the tail scenarios gain. The full P&L
/// sequence is retained so callers can persist or re-bin the distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    alpha: f64,
    var: f64,
    es: f64,
    pnl: Vec<f64>,
    low_confidence: bool,
}

impl RiskMetrics {
    /// Confidence level the metrics were computed at.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Value at Risk: the loss magnitude not expected to be exceeded with
    /// probability `alpha`.
    #[must_use]
    pub fn var(&self) -> f64 {
        self.var
    }

    /// Expected Shortfall: the average loss magnitude at or beyond VaR.
    /// Never smaller than [`var`](Self::var).
    #[must_use]
    pub fn es(&self) -> f64 {
        self.es
    }

    /// The per-scenario P&L sequence, in scenario order.
    #[must_use]
    pub fn pnl(&self) -> &[f64] {
        &self.pnl
    }

    /// True when too few scenarios exist for a stable tail estimate,
    /// fewer than `1 / (1 - alpha)`.
    #[must_use]
    pub fn low_confidence(&self) -> bool {
        self.low_confidence
    }
}

/// Maps portfolios onto scenario sets and aggregates tail risk.
///
/// Sign convention: a position's P&L in a scenario is
/// `-sensitivity * (scenario_yield - base_yield)` at the position's
/// nearest grid tenor, so positive exposure loses value when yields rise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskEngine;

impl RiskEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes VaR and ES for a portfolio over a scenario set.
    ///
    /// VaR(alpha) is the empirical `1 - alpha` quantile of the P&L
    /// distribution with linear interpolation between order statistics
    /// (the `h = (n - 1) p` rule), negated into a loss magnitude. ES is
    /// the negated mean of the P&L at or below that quantile.
    ///
    /// # Errors
    ///
    /// Returns an error for `alpha` outside `(0, 1)`, an empty scenario
    /// set, or an empty portfolio.
    pub fn run(
        &self,
        set: &ScenarioSet,
        portfolio: &Portfolio,
        alpha: f64,
    ) -> RiskResult<RiskMetrics> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(RiskError::InvalidAlpha { alpha });
        }
        if set.is_empty() {
            return Err(RiskError::EmptyScenarioSet);
        }
        if portfolio.is_empty() {
            return Err(RiskError::EmptyPortfolio);
        }

        let base = set.base();
        let pnl: Vec<f64> = set
            .scenarios()
            .iter()
            .map(|scenario| {
                portfolio
                    .positions()
                    .iter()
                    .map(|p| {
                        let shock = scenario.curve().yield_nearest(p.tenor)
                            - base.yield_nearest(p.tenor);
                        -p.sensitivity * shock
                    })
                    .sum()
            })
            .collect();

        let n = pnl.len();
        let mut sorted = pnl.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q = interpolated_quantile(&sorted, 1.0 - alpha);
        let var = -q;

        let tail: Vec<f64> = sorted.iter().copied().filter(|&v| v <= q).collect();
        let es = if tail.is_empty() {
            var
        } else {
            -(tail.iter().sum::<f64>() / tail.len() as f64)
        };

        let low_confidence = (n as f64) < 1.0 / (1.0 - alpha);
        if low_confidence {
            log::warn!(
                "Only {} scenarios for alpha {}: tail estimate is low-confidence",
                n,
                alpha
            );
        }

        Ok(RiskMetrics {
            alpha,
            var,
            es,
            pnl,
            low_confidence,
        })
    }
}

/// Empirical quantile of a sorted sample, linear interpolation between
/// order statistics at fractional rank `h = (n - 1) p`.
fn interpolated_quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use curvecast_core::types::CurveSnapshot;
    use curvecast_curves::changes::ChangeSeries;
    use curvecast_scenarios::generator::ScenarioGenerator;

    fn snap(d: u32, yields: &[f64]) -> CurveSnapshot {
        let date = NaiveDate::from_ymd_opt(2025, 8, d).unwrap();
        let tenors: Vec<f64> = (1..=yields.len()).map(|i| i as f64 * 2.0).collect();
        CurveSnapshot::new(date, tenors, yields.to_vec()).unwrap()
    }

    /// A scenario set whose only shock is +100bp at every tenor.
    fn parallel_up_set() -> ScenarioSet {
        let snaps = [snap(1, &[0.030, 0.040]), snap(2, &[0.040, 0.050])];
        let base = snaps[1].clone();
        let changes = ChangeSeries::from_snapshots(&snaps).unwrap();
        ScenarioGenerator::new(4, 1).historical(&base, &changes).unwrap()
    }

    fn varied_set(n: usize) -> ScenarioSet {
        let mut yields = vec![0.030, 0.040];
        let mut snaps = vec![snap(1, &yields)];
        let moves = [0.0010, -0.0015, 0.0022, -0.0005, 0.0013, -0.0028, 0.0007];
        for (day, m) in moves.iter().enumerate() {
            for y in yields.iter_mut() {
                *y += m;
            }
            snaps.push(snap(day as u32 + 2, &yields));
        }
        let base = snaps[snaps.len() - 1].clone();
        let changes = ChangeSeries::from_snapshots(&snaps).unwrap();
        ScenarioGenerator::new(n, 17).historical(&base, &changes).unwrap()
    }

    #[test]
    fn test_sign_convention() {
        // +100bp shock against sensitivity S loses exactly S * 0.01
        let set = parallel_up_set();
        let portfolio = Portfolio::single(2.0, 50_000.0).unwrap();

        let metrics = RiskEngine::new().run(&set, &portfolio, 0.5).unwrap();
        for &pnl in metrics.pnl() {
            assert_relative_eq!(pnl, -50_000.0 * 0.01, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_es_dominates_var() {
        let set = varied_set(500);
        let portfolio = Portfolio::single(4.0, 100_000.0).unwrap();

        for alpha in [0.90, 0.95, 0.99] {
            let metrics = RiskEngine::new().run(&set, &portfolio, alpha).unwrap();
            assert!(metrics.es() >= metrics.var() - 1e-12);
        }
    }

    #[test]
    fn test_var_monotone_in_alpha() {
        let set = varied_set(500);
        let portfolio = Portfolio::single(4.0, 100_000.0).unwrap();
        let engine = RiskEngine::new();

        let mut last = f64::NEG_INFINITY;
        for alpha in [0.80, 0.90, 0.95, 0.975, 0.99] {
            let metrics = engine.run(&set, &portfolio, alpha).unwrap();
            assert!(metrics.var() >= last - 1e-12);
            last = metrics.var();
        }
    }

    #[test]
    fn test_zero_pnl_gives_zero_metrics() {
        let yields = vec![0.02, 0.02];
        let snaps: Vec<CurveSnapshot> = (1..=4).map(|d| snap(d, &yields)).collect();
        let base = snaps[3].clone();
        let changes = ChangeSeries::from_snapshots(&snaps).unwrap();
        let set = ScenarioGenerator::new(100, 9).historical(&base, &changes).unwrap();

        let portfolio = Portfolio::single(2.0, 75_000.0).unwrap();
        let metrics = RiskEngine::new().run(&set, &portfolio, 0.95).unwrap();
        assert_relative_eq!(metrics.var(), 0.0);
        assert_relative_eq!(metrics.es(), 0.0);
    }

    #[test]
    fn test_low_confidence_flag() {
        let set = parallel_up_set(); // only 4 scenarios
        let portfolio = Portfolio::single(2.0, 1_000.0).unwrap();
        let engine = RiskEngine::new();

        let metrics = engine.run(&set, &portfolio, 0.99).unwrap();
        assert!(metrics.low_confidence());

        let metrics = engine.run(&set, &portfolio, 0.5).unwrap();
        assert!(!metrics.low_confidence());
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let set = parallel_up_set();
        let portfolio = Portfolio::single(2.0, 1_000.0).unwrap();
        let engine = RiskEngine::new();
        assert!(matches!(
            engine.run(&set, &portfolio, 1.0),
            Err(RiskError::InvalidAlpha { .. })
        ));
        assert!(matches!(
            engine.run(&set, &portfolio, 0.0),
            Err(RiskError::InvalidAlpha { .. })
        ));
    }

    #[test]
    fn test_interpolated_quantile() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(interpolated_quantile(&sorted, 0.0), 1.0);
        assert_relative_eq!(interpolated_quantile(&sorted, 1.0), 5.0);
        assert_relative_eq!(interpolated_quantile(&sorted, 0.5), 3.0);
        assert_relative_eq!(interpolated_quantile(&sorted, 0.125), 1.5);
    }
}
