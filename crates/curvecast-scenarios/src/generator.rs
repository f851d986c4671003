//! Scenario set generation from historical changes.

use nalgebra::{Cholesky, DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use curvecast_core::types::{CurveSnapshot, EngineConfig};
use curvecast_curves::changes::ChangeSeries;
use curvecast_factors::model::FactorModel;
use curvecast_math::stats::{column_means, psd_sqrt, sample_covariance};

use crate::error::{ScenarioError, ScenarioResult};

/// How a scenario set's shocks were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioMethod {
    /// Uniform resampling with replacement from observed change rows.
    Historical,
    /// I.i.d. draws from a Gaussian fitted to the change rows.
    Parametric,
}

impl std::fmt::Display for ScenarioMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Historical => write!(f, "historical"),
            Self::Parametric => write!(f, "parametric"),
        }
    }
}

/// One simulated future curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    index: usize,
    method: ScenarioMethod,
    curve: CurveSnapshot,
}

impl Scenario {
    /// Draw index within the generating run.
    ///
    /// Indices of dropped draws are absent, so a set with drops has gaps.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Generation method.
    #[must_use]
    pub fn method(&self) -> ScenarioMethod {
        self.method
    }

    /// The shocked curve.
    #[must_use]
    pub fn curve(&self) -> &CurveSnapshot {
        &self.curve
    }
}

/// A base curve together with its simulated shocked curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    base: CurveSnapshot,
    method: ScenarioMethod,
    scenarios: Vec<Scenario>,
    dropped: usize,
}

impl ScenarioSet {
    /// The unshocked base curve the scenarios were built from.
    #[must_use]
    pub fn base(&self) -> &CurveSnapshot {
        &self.base
    }

    /// Generation method shared by every scenario in the set.
    #[must_use]
    pub fn method(&self) -> ScenarioMethod {
        self.method
    }

    /// The surviving scenarios, in draw order.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Number of surviving scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// True when no scenario survived. Constructors never return this.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Number of draws dropped for producing non-finite yields.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Generates scenario sets with a deterministic, seedable random stream.
///
/// A single `StdRng` seeded from the configured seed is consumed
/// sequentially in draw order, so a fixed seed yields a bit-identical
/// scenario set for a given mode and count.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioGenerator {
    n_scenarios: usize,
    seed: u64,
}

impl ScenarioGenerator {
    /// Creates a generator for `n_scenarios` draws from `seed`.
    #[must_use]
    pub fn new(n_scenarios: usize, seed: u64) -> Self {
        Self { n_scenarios, seed }
    }

    /// Creates a generator from the pipeline configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.n_scenarios, config.seed)
    }

    /// Configured scenario count.
    #[must_use]
    pub fn n_scenarios(&self) -> usize {
        self.n_scenarios
    }

    /// Configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Resamples observed change rows onto the base curve.
    ///
    /// Each draw picks one change row uniformly at random with replacement
    /// and adds it to the base yields tenor by tenor.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero scenario count, a change grid that does
    /// not match the base curve, or when every draw is dropped.
    pub fn historical(
        &self,
        base: &CurveSnapshot,
        changes: &ChangeSeries,
    ) -> ScenarioResult<ScenarioSet> {
        self.check_grid(base, changes.tenors())?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let rows = changes.rows();
        let shocks: Vec<&Vec<f64>> = (0..self.n_scenarios)
            .map(|_| &rows[rng.gen_range(0..rows.len())])
            .collect();

        self.assemble(base, ScenarioMethod::Historical, shocks.into_iter())
    }

    /// Draws shocks from a Gaussian fitted to the change rows.
    ///
    /// The Gaussian uses the sample mean and covariance of the full tenor
    /// space. Draws are `mu + L z` with `L` the Cholesky factor of the
    /// covariance, falling back to the eigenvalue square root when the
    /// covariance is rank-deficient.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero scenario count, a mismatched grid,
    /// fewer than 2 change rows, or when every draw is dropped.
    pub fn parametric(
        &self,
        base: &CurveSnapshot,
        changes: &ChangeSeries,
    ) -> ScenarioResult<ScenarioSet> {
        self.check_grid(base, changes.tenors())?;

        let m = changes.len();
        let k = changes.width();
        let x = DMatrix::from_fn(m, k, |i, j| changes.rows()[i][j]);
        let mean = column_means(&x);
        let covariance = sample_covariance(&x)?;
        let factor = match Cholesky::new(covariance.clone()) {
            Some(chol) => chol.l(),
            None => {
                log::debug!("Covariance not positive definite; using eigenvalue square root");
                psd_sqrt(&covariance)
            }
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut shocks = Vec::with_capacity(self.n_scenarios);
        for _ in 0..self.n_scenarios {
            let z = DVector::from_fn(k, |_, _| rng.sample::<f64, _>(StandardNormal));
            let shock = &mean + &factor * z;
            shocks.push(shock.iter().copied().collect::<Vec<f64>>());
        }

        self.assemble(base, ScenarioMethod::Parametric, shocks.iter())
    }

    /// Draws shocks in factor space and reconstructs them via the loadings.
    ///
    /// Each retained component's score is sampled as an independent
    /// Gaussian with the component's sample score variance, then mapped
    /// back to tenor space and re-centered on the model's mean change.
    /// Components with zero score variance contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero scenario count, a mismatched grid,
    /// fewer than 2 score rows, or when every draw is dropped.
    pub fn parametric_in_factor_space(
        &self,
        base: &CurveSnapshot,
        model: &FactorModel,
    ) -> ScenarioResult<ScenarioSet> {
        self.check_grid(base, model.tenors())?;

        let m = model.scores().len();
        if m < 2 {
            return Err(ScenarioError::InsufficientScores {
                required: 2,
                actual: m,
            });
        }

        // Scores are centered by construction, so the sample variance is
        // just the mean square with the n - 1 denominator.
        let c = model.n_components();
        let score_stds: Vec<f64> = (0..c)
            .map(|comp| {
                let ss: f64 = model.scores().iter().map(|row| row[comp] * row[comp]).sum();
                (ss / (m as f64 - 1.0)).sqrt()
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut shocks = Vec::with_capacity(self.n_scenarios);
        for _ in 0..self.n_scenarios {
            let scores: Vec<f64> = score_stds
                .iter()
                .map(|std| std * rng.sample::<f64, _>(StandardNormal))
                .collect();
            let reconstructed = model.reconstruct_row(&scores);
            let shock: Vec<f64> = model
                .mean()
                .iter()
                .zip(&reconstructed)
                .map(|(mu, r)| mu + r)
                .collect();
            shocks.push(shock);
        }

        self.assemble(base, ScenarioMethod::Parametric, shocks.iter())
    }

    fn check_grid(&self, base: &CurveSnapshot, tenors: &[f64]) -> ScenarioResult<()> {
        if self.n_scenarios == 0 {
            return Err(ScenarioError::ZeroScenarios);
        }
        let aligned = base.tenors().len() == tenors.len()
            && base
                .tenors()
                .iter()
                .zip(tenors)
                .all(|(a, b)| (a - b).abs() < 1e-12);
        if !aligned {
            return Err(ScenarioError::GridMismatch {
                changes: tenors.len(),
                base: base.tenors().len(),
            });
        }
        Ok(())
    }

    fn assemble<'a, I>(
        &self,
        base: &CurveSnapshot,
        method: ScenarioMethod,
        shocks: I,
    ) -> ScenarioResult<ScenarioSet>
    where
        I: Iterator<Item = &'a Vec<f64>>,
    {
        let mut scenarios = Vec::with_capacity(self.n_scenarios);
        let mut dropped = 0;

        for (index, shock) in shocks.enumerate() {
            match base.shifted(base.date(), shock) {
                Some(curve) => scenarios.push(Scenario {
                    index,
                    method,
                    curve,
                }),
                None => {
                    dropped += 1;
                    log::warn!("Dropping {} scenario {}: non-finite yields", method, index);
                }
            }
        }

        if scenarios.is_empty() {
            return Err(ScenarioError::AllDropped {
                requested: self.n_scenarios,
            });
        }
        if dropped > 0 {
            log::warn!(
                "{} of {} {} scenarios dropped as non-finite",
                dropped,
                self.n_scenarios,
                method
            );
        }

        Ok(ScenarioSet {
            base: base.clone(),
            method,
            scenarios,
            dropped,
        })
    }
}
