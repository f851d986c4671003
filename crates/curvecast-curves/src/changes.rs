//! Day-over-day yield changes on a fixed tenor grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use curvecast_core::types::CurveSnapshot;

use crate::error::{CurveError, CurveResult};

/// Day-over-day yield changes, one row per consecutive snapshot pair.
///
/// Rows are aligned with the tenor grid of the most recent snapshot; the
/// date attached to a row is the later day of the pair. A pair in which
/// either day is missing a grid tenor yields no complete row — such pairs
/// are counted in `skipped_rows` rather than imputed, so the matrix stays
/// rectangular for the factor model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSeries {
    tenors: Vec<f64>,
    dates: Vec<NaiveDate>,
    rows: Vec<Vec<f64>>,
    skipped_rows: usize,
}

impl ChangeSeries {
    /// Derives the change series from a date-ordered snapshot history.
    ///
    /// # Errors
    ///
    /// Returns an error with fewer than 2 snapshots, unordered dates, or
    /// when every pair is incomplete on the grid.
    pub fn from_snapshots(snapshots: &[CurveSnapshot]) -> CurveResult<Self> {
        if snapshots.len() < 2 {
            return Err(CurveError::InsufficientHistory {
                required: 2,
                actual: snapshots.len(),
            });
        }
        for pair in snapshots.windows(2) {
            if pair[1].date() <= pair[0].date() {
                return Err(CurveError::HistoryNotOrdered {
                    previous: pair[0].date(),
                    current: pair[1].date(),
                });
            }
        }

        let tenors = snapshots[snapshots.len() - 1].tenors().to_vec();
        let mut dates = Vec::with_capacity(snapshots.len() - 1);
        let mut rows = Vec::with_capacity(snapshots.len() - 1);
        let mut skipped_rows = 0;

        for pair in snapshots.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let row: Option<Vec<f64>> = tenors
                .iter()
                .map(|&t| match (curr.yield_at(t), prev.yield_at(t)) {
                    (Some(now), Some(before)) => Some(now - before),
                    _ => None,
                })
                .collect();

            match row {
                Some(row) => {
                    dates.push(curr.date());
                    rows.push(row);
                }
                None => {
                    skipped_rows += 1;
                    log::warn!(
                        "Dropping change row for {}: tenor gap against {}",
                        curr.date(),
                        prev.date()
                    );
                }
            }
        }

        if rows.is_empty() {
            return Err(CurveError::NoCompleteRows {
                pairs: snapshots.len() - 1,
            });
        }

        Ok(Self {
            tenors,
            dates,
            rows,
            skipped_rows,
        })
    }

    /// Returns the tenor grid the rows are aligned with.
    #[must_use]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Returns the row dates (later day of each pair).
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the change rows, decimal units, aligned with `tenors`.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of complete change rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no complete row survived. Constructors never return this.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of tenor columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.tenors.len()
    }

    /// Number of snapshot pairs dropped for tenor gaps.
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn snap(d: u32, tenors: &[f64], yields: &[f64]) -> CurveSnapshot {
        CurveSnapshot::new(date(d), tenors.to_vec(), yields.to_vec()).unwrap()
    }

    #[test]
    fn test_basic_differencing() {
        let history = [
            snap(2, &[1.0, 10.0], &[0.040, 0.045]),
            snap(3, &[1.0, 10.0], &[0.041, 0.044]),
            snap(4, &[1.0, 10.0], &[0.043, 0.044]),
        ];
        let changes = ChangeSeries::from_snapshots(&history).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes.skipped_rows(), 0);
        assert_eq!(changes.dates(), &[date(3), date(4)]);
        assert_relative_eq!(changes.rows()[0][0], 0.001, epsilon = 1e-12);
        assert_relative_eq!(changes.rows()[0][1], -0.001, epsilon = 1e-12);
        assert_relative_eq!(changes.rows()[1][0], 0.002, epsilon = 1e-12);
        assert_relative_eq!(changes.rows()[1][1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tenor_gap_drops_row_not_run() {
        let history = [
            snap(2, &[1.0, 10.0], &[0.040, 0.045]),
            snap(3, &[1.0], &[0.041]), // 10y missing this day
            snap(4, &[1.0, 10.0], &[0.043, 0.044]),
            snap(5, &[1.0, 10.0], &[0.042, 0.045]),
        ];
        let changes = ChangeSeries::from_snapshots(&history).unwrap();

        // Both pairs touching the gappy day are incomplete on the grid
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.skipped_rows(), 2);
        assert_eq!(changes.dates(), &[date(5)]);
        assert_relative_eq!(changes.rows()[0][0], -0.001, epsilon = 1e-12);
    }

    #[test]
    fn test_needs_two_snapshots() {
        let history = [snap(2, &[1.0, 10.0], &[0.040, 0.045])];
        assert!(matches!(
            ChangeSeries::from_snapshots(&history),
            Err(CurveError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn test_rejects_unordered() {
        let history = [
            snap(3, &[1.0, 10.0], &[0.040, 0.045]),
            snap(2, &[1.0, 10.0], &[0.041, 0.044]),
        ];
        assert!(matches!(
            ChangeSeries::from_snapshots(&history),
            Err(CurveError::HistoryNotOrdered { .. })
        ));
    }

    #[test]
    fn test_all_pairs_gappy_is_error() {
        let history = [
            snap(2, &[1.0], &[0.040]),
            snap(3, &[1.0, 10.0], &[0.041, 0.044]),
        ];
        // Grid comes from the last snapshot; the only pair lacks 10y before
        assert!(matches!(
            ChangeSeries::from_snapshots(&history),
            Err(CurveError::NoCompleteRows { pairs: 1 })
        ));
    }

    #[test]
    fn test_flat_history_gives_zero_rows() {
        let history: Vec<CurveSnapshot> = (2..7)
            .map(|d| snap(d, &[1.0, 2.0, 10.0], &[0.02, 0.02, 0.02]))
            .collect();
        let changes = ChangeSeries::from_snapshots(&history).unwrap();
        assert_eq!(changes.len(), 4);
        for row in changes.rows() {
            for &v in row {
                assert_relative_eq!(v, 0.0);
            }
        }
    }
}
