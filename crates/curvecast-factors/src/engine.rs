//! PCA extraction over a change series.

use nalgebra::DMatrix;

use curvecast_curves::changes::ChangeSeries;
use curvecast_math::stats::{center_columns, sorted_symmetric_eigen, EIGENVALUE_TOLERANCE};

use crate::error::{FactorError, FactorResult};
use crate::model::FactorModel;

/// Extracts principal components from day-over-day yield changes.
///
/// The engine mean-centers each tenor column, eigen-decomposes the K×K
/// covariance matrix of changes, and keeps the top components by
/// eigenvalue. Rank deficiency is not an error: eigenvalues at or below
/// the numerical threshold contribute zero-filled loadings with zero
/// explained variance, and the model reports its reduced effective rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct PcaEngine;

impl PcaEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fits a factor model with `n_components` components.
    ///
    /// The requested count must satisfy `1 <= n_components <= K`; it is
    /// further clamped to the number of rows when the history is shorter
    /// than the grid is wide.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than 2 change rows or a component count
    /// outside `1..=K`.
    pub fn fit(&self, changes: &ChangeSeries, n_components: usize) -> FactorResult<FactorModel> {
        let m = changes.len();
        let k = changes.width();

        if m < 2 {
            return Err(FactorError::InsufficientRows {
                required: 2,
                actual: m,
            });
        }
        if n_components == 0 || n_components > k {
            return Err(FactorError::InvalidComponentCount {
                requested: n_components,
                tenors: k,
            });
        }

        let c = n_components.min(m);
        if m < k {
            log::warn!(
                "Change series has {} rows for {} tenors; covariance is rank-deficient",
                m,
                k
            );
        }

        let x = DMatrix::from_fn(m, k, |i, j| changes.rows()[i][j]);
        let (centered, mean) = center_columns(&x);
        let covariance = centered.transpose() * &centered / (m as f64 - 1.0);
        let (eigenvalues, eigenvectors) = sorted_symmetric_eigen(&covariance);

        let total_variance: f64 = eigenvalues.iter().sum();
        let effective_rank = eigenvalues
            .iter()
            .filter(|&&v| v > EIGENVALUE_TOLERANCE)
            .count();

        let mut loadings = vec![vec![0.0; c]; k];
        let mut explained = vec![0.0; c];

        for comp in 0..c {
            let eigenvalue = eigenvalues[comp];
            if eigenvalue <= EIGENVALUE_TOLERANCE {
                continue; // zero variance direction stays zero-filled
            }

            let column = eigenvectors.column(comp);
            // Deterministic sign: aggregate loading must be non-negative,
            // so the dominant level component points "yields up".
            let sign = if column.sum() < 0.0 { -1.0 } else { 1.0 };
            for (row, value) in loadings.iter_mut().zip(column.iter()) {
                row[comp] = sign * value;
            }
            if total_variance > EIGENVALUE_TOLERANCE {
                explained[comp] = eigenvalue / total_variance;
            }
        }

        let mut scores = vec![vec![0.0; c]; m];
        for (i, score_row) in scores.iter_mut().enumerate() {
            for comp in 0..c {
                score_row[comp] = (0..k)
                    .map(|j| centered[(i, j)] * loadings[j][comp])
                    .sum();
            }
        }

        Ok(FactorModel {
            tenors: changes.tenors().to_vec(),
            mean: mean.iter().copied().collect(),
            loadings,
            scores,
            explained_variance_ratio: explained,
            effective_rank,
        })
    }
}
