//! Full revaluation of a zero-coupon bond ladder.
//!
//! Complements the linear sensitivity engine with exact repricing:
//! each instrument is a notional due at a maturity, discounted off the
//! curve at its nearest grid tenor.

use curvecast_core::types::CurveSnapshot;
use curvecast_scenarios::generator::ScenarioSet;

use crate::error::{RiskError, RiskResult};

/// Price of a unit zero-coupon bond, continuous compounding.
#[must_use]
pub fn zcb_price(yield_rate: f64, maturity: f64) -> f64 {
    (-yield_rate * maturity).exp()
}

/// Present value of a `(maturity, notional)` ladder on a curve.
///
/// Each leg discounts at the curve yield of its nearest grid tenor.
///
/// # Errors
///
/// Returns an error for an empty ladder or a non-positive maturity.
pub fn ladder_value(curve: &CurveSnapshot, ladder: &[(f64, f64)]) -> RiskResult<f64> {
    if ladder.is_empty() {
        return Err(RiskError::EmptyPortfolio);
    }
    let mut value = 0.0;
    for &(maturity, notional) in ladder {
        if !(maturity > 0.0) || !maturity.is_finite() {
            return Err(RiskError::InvalidMaturity { maturity });
        }
        value += notional * zcb_price(curve.yield_nearest(maturity), maturity);
    }
    Ok(value)
}

/// Full-revaluation P&L of a ladder across a scenario set.
///
/// Returns one P&L per scenario, in scenario order: the ladder's value on
/// the shocked curve minus its value on the base curve.
///
/// # Errors
///
/// Returns an error for an empty ladder or a non-positive maturity.
pub fn ladder_pnl(set: &ScenarioSet, ladder: &[(f64, f64)]) -> RiskResult<Vec<f64>> {
    let base_value = ladder_value(set.base(), ladder)?;
    set.scenarios()
        .iter()
        .map(|scenario| Ok(ladder_value(scenario.curve(), ladder)? - base_value))
        .collect()
}
