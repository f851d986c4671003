//! Per-date Nelson-Siegel curve fitting.
//!
//! Each observation date is fitted independently by bounded least squares;
//! a prior day's converged parameters can seed the next fit as an explicit
//! warm start, so sequential and parallel execution give the same
//! per-date contract.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use curvecast_core::types::CurveSnapshot;
use curvecast_math::least_squares::{bounded_levenberg_marquardt, LeastSquaresConfig};
use curvecast_math::nelson_siegel::NelsonSiegel;

use crate::error::{CurveError, CurveResult};

/// Box bounds for β₀, β₁, β₂ (decimal yield units).
pub const BETA_BOUNDS: (f64, f64) = (-0.10, 0.20);
/// Box bounds for τ (years).
pub const TAU_BOUNDS: (f64, f64) = (0.05, 10.0);
/// Default decay guess when no warm start is available.
pub const DEFAULT_TAU: f64 = 1.5;
/// Minimum observed tenor points for a stable 4-parameter fit.
pub const MIN_POINTS: usize = 4;

/// Fitted Nelson-Siegel parameters for one observation date.
///
/// Never mutated after creation; unconverged fits keep the best parameters
/// reached so downstream diagnostics can still use the date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NelsonSiegelParams {
    /// Observation date.
    pub date: NaiveDate,
    /// Long-term level.
    pub beta0: f64,
    /// Short-term component.
    pub beta1: f64,
    /// Medium-term component.
    pub beta2: f64,
    /// Decay factor.
    pub tau: f64,
    /// Euclidean norm of the fit residuals.
    pub residual_norm: f64,
    /// Whether the solver met a convergence criterion.
    pub converged: bool,
}

impl NelsonSiegelParams {
    /// Returns the fitted curve model.
    pub fn model(&self) -> CurveResult<NelsonSiegel> {
        Ok(NelsonSiegel::new(
            self.beta0, self.beta1, self.beta2, self.tau,
        )?)
    }

    /// Evaluates the fitted model over a tenor grid as a snapshot.
    pub fn fitted_curve(&self, tenors: &[f64]) -> CurveResult<CurveSnapshot> {
        let model = self.model()?;
        let yields = model.yields(tenors);
        Ok(CurveSnapshot::new(self.date, tenors.to_vec(), yields)?)
    }

    /// True when every parameter sits inside the fitting box.
    #[must_use]
    pub fn within_bounds(&self) -> bool {
        let (beta_lo, beta_hi) = BETA_BOUNDS;
        let (tau_lo, tau_hi) = TAU_BOUNDS;
        [self.beta0, self.beta1, self.beta2]
            .iter()
            .all(|b| *b >= beta_lo && *b <= beta_hi)
            && self.tau >= tau_lo
            && self.tau <= tau_hi
    }
}

/// Configuration for the curve fitter.
#[derive(Debug, Clone, Copy)]
pub struct FitterConfig {
    /// Solver configuration for the inner least-squares runs.
    pub solver: LeastSquaresConfig,
}

impl Default for FitterConfig {
    fn default() -> Self {
        Self {
            solver: LeastSquaresConfig::default(),
        }
    }
}

/// Fits Nelson-Siegel parameters to observed curves, one date at a time.
///
/// Fits for different dates are independent; the optional warm start is an
/// explicit input rather than hidden iteration state, so callers are free
/// to fit dates concurrently.
#[derive(Debug, Clone, Default)]
pub struct CurveFitter {
    config: FitterConfig,
}

impl CurveFitter {
    /// Creates a fitter with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fitter with custom configuration.
    #[must_use]
    pub fn with_config(config: FitterConfig) -> Self {
        Self { config }
    }

    /// Fits one day's curve.
    ///
    /// `warm_start` seeds the solver when it converged and sits inside the
    /// bounds; otherwise the default guess is used. On non-convergence the
    /// solver is retried once from the default guess and the better of the
    /// two attempts is kept, flagged `converged = false` if neither
    /// attempt converged.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot has fewer than 4 points.
    pub fn fit_day(
        &self,
        snapshot: &CurveSnapshot,
        warm_start: Option<&NelsonSiegelParams>,
    ) -> CurveResult<NelsonSiegelParams> {
        if snapshot.len() < MIN_POINTS {
            return Err(CurveError::insufficient_points(MIN_POINTS, snapshot.len()));
        }

        let default_guess = Self::default_guess(snapshot);
        let initial = match warm_start {
            Some(prior) if prior.converged && prior.within_bounds() => {
                [prior.beta0, prior.beta1, prior.beta2, prior.tau]
            }
            _ => default_guess,
        };

        let mut result = self.solve(snapshot, &initial)?;
        if !result.converged && initial != default_guess {
            let retry = self.solve(snapshot, &default_guess)?;
            if retry.converged || retry.objective < result.objective {
                result = retry;
            }
        }

        if !result.converged {
            log::warn!(
                "Nelson-Siegel fit did not converge for {} (objective {:.3e})",
                snapshot.date(),
                result.objective
            );
        }

        Ok(NelsonSiegelParams {
            date: snapshot.date(),
            beta0: result.parameters[0],
            beta1: result.parameters[1],
            beta2: result.parameters[2],
            tau: result.parameters[3],
            residual_norm: result.objective.sqrt(),
            converged: result.converged,
        })
    }

    /// Fits a date-ordered history sequentially, chaining warm starts.
    ///
    /// Dates that cannot be fitted (too few points) are skipped with a
    /// warning; the run fails only when no date fits at all.
    pub fn fit_history(
        &self,
        snapshots: &[CurveSnapshot],
    ) -> CurveResult<Vec<NelsonSiegelParams>> {
        Self::check_ordered(snapshots)?;

        let mut fits: Vec<NelsonSiegelParams> = Vec::with_capacity(snapshots.len());
        let mut prior: Option<NelsonSiegelParams> = None;

        for snapshot in snapshots {
            match self.fit_day(snapshot, prior.as_ref()) {
                Ok(fit) => {
                    prior = Some(fit);
                    fits.push(fit);
                }
                Err(err) => {
                    log::warn!("Skipping fit for {}: {}", snapshot.date(), err);
                }
            }
        }

        if fits.is_empty() {
            return Err(CurveError::AllFitsFailed {
                dates: snapshots.len(),
            });
        }
        Ok(fits)
    }

    /// Fits a history with per-date parallelism.
    ///
    /// Warm starts are sequential by nature, so every date starts from the
    /// default guess here; results are otherwise equivalent to
    /// [`fit_history`](Self::fit_history) and stay in input order.
    pub fn fit_history_parallel(
        &self,
        snapshots: &[CurveSnapshot],
    ) -> CurveResult<Vec<NelsonSiegelParams>> {
        Self::check_ordered(snapshots)?;

        let fits: Vec<NelsonSiegelParams> = snapshots
            .par_iter()
            .filter_map(|snapshot| match self.fit_day(snapshot, None) {
                Ok(fit) => Some(fit),
                Err(err) => {
                    log::warn!("Skipping fit for {}: {}", snapshot.date(), err);
                    None
                }
            })
            .collect();

        if fits.is_empty() {
            return Err(CurveError::AllFitsFailed {
                dates: snapshots.len(),
            });
        }
        Ok(fits)
    }

    /// Default initial guess: level from the mean yield, slope from
    /// short-minus-long, no hump, τ = 1.5.
    fn default_guess(snapshot: &CurveSnapshot) -> [f64; 4] {
        let yields = snapshot.yields();
        let mean = yields.iter().sum::<f64>() / yields.len() as f64;
        let slope = yields[0] - yields[yields.len() - 1];
        let (beta_lo, beta_hi) = BETA_BOUNDS;
        [
            mean.clamp(beta_lo, beta_hi),
            slope.clamp(beta_lo, beta_hi),
            0.0,
            DEFAULT_TAU,
        ]
    }

    fn solve(
        &self,
        snapshot: &CurveSnapshot,
        initial: &[f64; 4],
    ) -> CurveResult<curvecast_math::least_squares::LeastSquaresResult> {
        let tenors = snapshot.tenors().to_vec();
        let observed = snapshot.yields().to_vec();
        let bounds = [BETA_BOUNDS, BETA_BOUNDS, BETA_BOUNDS, TAU_BOUNDS];

        let residuals = move |p: &[f64]| -> Vec<f64> {
            let tau = p[3].max(TAU_BOUNDS.0);
            tenors
                .iter()
                .zip(&observed)
                .map(|(&t, &y)| {
                    let x = t / tau;
                    let modeled = p[0]
                        + p[1] * NelsonSiegel::loading_slope(x)
                        + p[2] * NelsonSiegel::loading_curvature(x);
                    y - modeled
                })
                .collect()
        };

        Ok(bounded_levenberg_marquardt(
            residuals,
            initial,
            &bounds,
            &self.config.solver,
        )?)
    }

    fn check_ordered(snapshots: &[CurveSnapshot]) -> CurveResult<()> {
        for pair in snapshots.windows(2) {
            if pair[1].date() <= pair[0].date() {
                return Err(CurveError::HistoryNotOrdered {
                    previous: pair[0].date(),
                    current: pair[1].date(),
                });
            }
        }
        Ok(())
    }
}
