//! The fitted factor model.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{FactorError, FactorResult};

/// A principal-component model of yield-change dynamics.
///
/// Built once per PCA run from a single change series; immutable. The
/// model operates on mean-centered changes: `mean` is the per-tenor mean
/// removed before projection, `loadings` is the tenor × component matrix
/// of unit-norm eigenvectors, `scores` the date × component projections
/// of the centered rows.
///
/// Components are sign-normalized: a component whose loading sums to a
/// negative value is flipped, so the dominant "level" component is
/// consistently non-negative in aggregate across runs and libraries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorModel {
    pub(crate) tenors: Vec<f64>,
    pub(crate) mean: Vec<f64>,
    pub(crate) loadings: Vec<Vec<f64>>,
    pub(crate) scores: Vec<Vec<f64>>,
    pub(crate) explained_variance_ratio: Vec<f64>,
    pub(crate) effective_rank: usize,
}

impl FactorModel {
    /// Returns the tenor grid the loadings are aligned with.
    #[must_use]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Returns the per-tenor mean change removed before projection.
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Returns the tenor × component loading rows.
    #[must_use]
    pub fn loadings(&self) -> &[Vec<f64>] {
        &self.loadings
    }

    /// Returns one component's loading vector across tenors.
    #[must_use]
    pub fn component_loading(&self, component: usize) -> Vec<f64> {
        self.loadings.iter().map(|row| row[component]).collect()
    }

    /// Returns the date × component score rows.
    #[must_use]
    pub fn scores(&self) -> &[Vec<f64>] {
        &self.scores
    }

    /// Explained variance ratios, descending, summing to at most 1.
    #[must_use]
    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }

    /// Number of eigenvalues above the numerical zero threshold.
    #[must_use]
    pub fn effective_rank(&self) -> usize {
        self.effective_rank
    }

    /// Number of retained components.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.explained_variance_ratio.len()
    }

    /// Number of tenor columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.tenors.len()
    }

    /// Projects one change row onto the components (centered scores).
    ///
    /// # Errors
    ///
    /// Returns an error when the row length disagrees with the grid.
    pub fn project(&self, row: &[f64]) -> FactorResult<Vec<f64>> {
        if row.len() != self.width() {
            return Err(FactorError::Math(
                curvecast_math::MathError::DimensionMismatch {
                    rows1: 1,
                    cols1: row.len(),
                    rows2: 1,
                    cols2: self.width(),
                },
            ));
        }
        let centered: Vec<f64> = row.iter().zip(&self.mean).map(|(v, m)| v - m).collect();
        Ok((0..self.n_components())
            .map(|c| {
                centered
                    .iter()
                    .zip(&self.loadings)
                    .map(|(v, load)| v * load[c])
                    .sum()
            })
            .collect())
    }

    /// Maps factor scores back to a tenor-space change row (centered).
    #[must_use]
    pub fn reconstruct_row(&self, factor_scores: &[f64]) -> Vec<f64> {
        self.loadings
            .iter()
            .map(|load| {
                load.iter()
                    .zip(factor_scores)
                    .map(|(l, s)| l * s)
                    .sum::<f64>()
            })
            .collect()
    }

    /// Reconstructs all centered change rows from the retained components.
    ///
    /// With all `K` components retained this reproduces the centered input
    /// to numerical precision.
    #[must_use]
    pub fn reconstruct_centered(&self) -> Vec<Vec<f64>> {
        self.scores
            .iter()
            .map(|score| self.reconstruct_row(score))
            .collect()
    }

    /// Returns the loadings as a K×C matrix.
    #[must_use]
    pub fn loadings_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.width(), self.n_components(), |k, c| {
            self.loadings[k][c]
        })
    }

    /// Returns the scores as an M×C matrix.
    #[must_use]
    pub fn scores_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.scores.len(), self.n_components(), |m, c| {
            self.scores[m][c]
        })
    }
}
