//! A single day's observed yield curve.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::tenor::nearest_tenor;

/// Plausible decimal yield band for observed market data.
///
/// Mirrors the data cleaner's sanity check; simulated scenario curves are
/// allowed to leave this band as long as they stay finite.
pub const PLAUSIBLE_YIELD_BAND: (f64, f64) = (-0.05, 0.25);

/// One observation date's yield curve on a fixed tenor grid.
///
/// Tenors are in years, yields in decimal units (`0.0421` = 4.21%).
/// Validated at construction and immutable afterwards: tenors strictly
/// increasing, yields finite.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use curvecast_core::types::CurveSnapshot;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let snap = CurveSnapshot::new(date, vec![1.0, 2.0, 10.0], vec![0.041, 0.040, 0.044]).unwrap();
/// assert_eq!(snap.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSnapshot {
    date: NaiveDate,
    tenors: Vec<f64>,
    yields: Vec<f64>,
}

impl CurveSnapshot {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the vectors disagree in length, tenors are not
    /// strictly increasing, or any yield is non-finite.
    pub fn new(date: NaiveDate, tenors: Vec<f64>, yields: Vec<f64>) -> CoreResult<Self> {
        if tenors.is_empty() {
            return Err(CoreError::empty("curve snapshot"));
        }
        if tenors.len() != yields.len() {
            return Err(CoreError::LengthMismatch {
                tenors: tenors.len(),
                yields: yields.len(),
            });
        }
        for (i, pair) in tenors.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(CoreError::TenorsNotIncreasing {
                    index: i + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        for (&t, &y) in tenors.iter().zip(&yields) {
            if !y.is_finite() {
                return Err(CoreError::NonFiniteYield { tenor: t });
            }
        }
        Ok(Self {
            date,
            tenors,
            yields,
        })
    }

    /// Returns the observation date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the tenor grid in years.
    #[must_use]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Returns the decimal yields, aligned with [`tenors`](Self::tenors).
    #[must_use]
    pub fn yields(&self) -> &[f64] {
        &self.yields
    }

    /// Number of tenor points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tenors.len()
    }

    /// True when the snapshot carries no points. Validated snapshots never do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tenors.is_empty()
    }

    /// Returns the yield at the grid tenor closest to `tenor`.
    #[must_use]
    pub fn yield_nearest(&self, tenor: f64) -> f64 {
        self.yields[nearest_tenor(tenor, &self.tenors)]
    }

    /// Returns the yield at an exact grid tenor, if present.
    #[must_use]
    pub fn yield_at(&self, tenor: f64) -> Option<f64> {
        self.tenors
            .iter()
            .position(|&t| (t - tenor).abs() < 1e-12)
            .map(|i| self.yields[i])
    }

    /// Checks every yield against the plausible market band.
    ///
    /// Intended for freshly loaded market data; scenario curves skip this.
    pub fn validate_plausible(&self) -> CoreResult<()> {
        let (min, max) = PLAUSIBLE_YIELD_BAND;
        for (&t, &y) in self.tenors.iter().zip(&self.yields) {
            if y < min || y > max {
                return Err(CoreError::ImplausibleYield {
                    tenor: t,
                    value: y,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Returns a copy of this curve with `shock[i]` added to each yield.
    ///
    /// The caller guarantees `shock` is aligned with the tenor grid. Returns
    /// `None` when any shocked yield is non-finite, so callers can drop and
    /// count the row instead of propagating NaNs.
    #[must_use]
    pub fn shifted(&self, date: NaiveDate, shock: &[f64]) -> Option<Self> {
        debug_assert_eq!(shock.len(), self.yields.len());
        let yields: Vec<f64> = self
            .yields
            .iter()
            .zip(shock)
            .map(|(y, s)| y + s)
            .collect();
        if yields.iter().any(|y| !y.is_finite()) {
            return None;
        }
        Some(Self {
            date,
            tenors: self.tenors.clone(),
            yields,
        })
    }
}
