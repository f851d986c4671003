//! Per-scenario headline numbers.

use serde::{Deserialize, Serialize};

use curvecast_core::types::CurveSnapshot;

use crate::generator::ScenarioSet;

/// Headline changes of one scenario versus the base curve, in basis points.
///
/// The 10y point and the 2s10s slope are read at the nearest grid tenors,
/// so the summary works on any grid, not just the standard 13-point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Draw index of the summarized scenario.
    pub index: usize,
    /// 10y yield change in basis points.
    pub y10_change_bp: f64,
    /// 2s10s slope change in basis points.
    pub s2s10_change_bp: f64,
}

fn slope(curve: &CurveSnapshot) -> f64 {
    curve.yield_nearest(10.0) - curve.yield_nearest(2.0)
}

/// Summarizes every scenario in a set against its base curve.
#[must_use]
pub fn summarize(set: &ScenarioSet) -> Vec<ScenarioSummary> {
    let base_y10 = set.base().yield_nearest(10.0);
    let base_slope = slope(set.base());

    set.scenarios()
        .iter()
        .map(|scenario| ScenarioSummary {
            index: scenario.index(),
            y10_change_bp: (scenario.curve().yield_nearest(10.0) - base_y10) * 1e4,
            s2s10_change_bp: (slope(scenario.curve()) - base_slope) * 1e4,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ScenarioGenerator;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use curvecast_curves::changes::ChangeSeries;

    fn snap(d: u32, yields: &[f64]) -> CurveSnapshot {
        let date = NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
        CurveSnapshot::new(date, vec![2.0, 10.0], yields.to_vec()).unwrap()
    }

    #[test]
    fn test_summary_in_basis_points() {
        // Single repeated change row: +10bp at 2y, +25bp at 10y
        let snaps = [
            snap(1, &[0.040, 0.043]),
            snap(2, &[0.041, 0.0455]),
        ];
        let base = snaps[1].clone();
        let changes = ChangeSeries::from_snapshots(&snaps).unwrap();

        let set = ScenarioGenerator::new(5, 1).historical(&base, &changes).unwrap();
        let summaries = summarize(&set);

        assert_eq!(summaries.len(), 5);
        for summary in summaries {
            assert_relative_eq!(summary.y10_change_bp, 25.0, epsilon = 1e-9);
            assert_relative_eq!(summary.s2s10_change_bp, 15.0, epsilon = 1e-9);
        }
    }
}
