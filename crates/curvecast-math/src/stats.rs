//! Matrix statistics: centering, covariance, eigen-decomposition.
//!
//! Rows are observations, columns are variables throughout.

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use crate::error::{MathError, MathResult};

/// Eigenvalues at or below this threshold are treated as zero variance.
pub const EIGENVALUE_TOLERANCE: f64 = 1e-12;

/// Returns the per-column means of an observation matrix.
pub fn column_means(x: &DMatrix<f64>) -> DVector<f64> {
    let m = x.nrows() as f64;
    DVector::from_fn(x.ncols(), |j, _| x.column(j).sum() / m)
}

/// Subtracts each column's mean; returns the centered matrix and the means.
pub fn center_columns(x: &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let means = column_means(x);
    let centered = DMatrix::from_fn(x.nrows(), x.ncols(), |i, j| x[(i, j)] - means[j]);
    (centered, means)
}

/// Sample covariance matrix (denominator `n - 1`) of an observation matrix.
///
/// # Errors
///
/// Returns an error with fewer than 2 observation rows.
pub fn sample_covariance(x: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let m = x.nrows();
    if m < 2 {
        return Err(MathError::insufficient_data(2, m));
    }
    let (centered, _) = center_columns(x);
    Ok(centered.transpose() * &centered / (m as f64 - 1.0))
}

/// Eigen-decomposition of a symmetric matrix, eigenpairs sorted by
/// descending eigenvalue.
///
/// Small negative eigenvalues produced by round-off are clamped to zero.
/// Eigenvectors are the columns of the returned matrix, unit norm.
pub fn sorted_symmetric_eigen(matrix: &DMatrix<f64>) -> (DVector<f64>, DMatrix<f64>) {
    let k = matrix.nrows();
    let eigen = SymmetricEigen::new(matrix.clone());

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let values = DVector::from_fn(k, |i, _| eigen.eigenvalues[order[i]].max(0.0));
    let vectors = DMatrix::from_fn(k, k, |i, j| eigen.eigenvectors[(i, order[j])]);
    (values, vectors)
}

/// A square root `L` of a positive semi-definite matrix: `L Lᵀ = A`.
///
/// Built from the eigen-decomposition with negative eigenvalues clamped to
/// zero, so it tolerates the rank-deficient covariance matrices that a
/// Cholesky factorization rejects.
pub fn psd_sqrt(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let (values, vectors) = sorted_symmetric_eigen(matrix);
    let k = matrix.nrows();
    DMatrix::from_fn(k, k, |i, j| vectors[(i, j)] * values[j].sqrt())
}
