//! Bounded nonlinear least squares.
//!
//! A Levenberg-Marquardt minimizer for small dense problems: numerical
//! central-difference Jacobian, Marquardt diagonal scaling, and box
//! constraints enforced by projecting each trial step onto the feasible
//! region. Sized for curve-fitting problems with a handful of parameters
//! and a few dozen residuals.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Configuration for the bounded Levenberg-Marquardt minimizer.
#[derive(Debug, Clone, Copy)]
pub struct LeastSquaresConfig {
    /// Maximum number of outer iterations.
    pub max_iterations: u32,
    /// Absolute objective (sum of squared residuals) below which the fit
    /// is accepted immediately.
    pub objective_tolerance: f64,
    /// Relative step-norm threshold for convergence.
    pub step_tolerance: f64,
    /// Infinity-norm gradient threshold for convergence.
    pub gradient_tolerance: f64,
    /// Initial damping parameter.
    pub initial_lambda: f64,
    /// Damping adjustment factor.
    pub lambda_factor: f64,
    /// Minimum damping value.
    pub min_lambda: f64,
    /// Maximum damping value before the search gives up.
    pub max_lambda: f64,
    /// Finite difference step scale for the Jacobian.
    pub jacobian_step: f64,
}

impl Default for LeastSquaresConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            objective_tolerance: 1e-18,
            step_tolerance: 1e-11,
            gradient_tolerance: 1e-10,
            initial_lambda: 1e-3,
            lambda_factor: 10.0,
            min_lambda: 1e-12,
            max_lambda: 1e12,
            jacobian_step: 1e-7,
        }
    }
}

impl LeastSquaresConfig {
    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the objective tolerance.
    #[must_use]
    pub fn with_objective_tolerance(mut self, tolerance: f64) -> Self {
        self.objective_tolerance = tolerance;
        self
    }
}

/// Result of a least-squares run.
#[derive(Debug, Clone)]
pub struct LeastSquaresResult {
    /// Best parameters found, inside the bounds.
    pub parameters: Vec<f64>,
    /// Final sum of squared residuals.
    pub objective: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether a convergence criterion was met.
    pub converged: bool,
}

/// Minimizes `|residuals(p)|²` over the box `bounds`.
///
/// # Arguments
///
/// * `residuals` - Maps a parameter slice to the residual vector. Must
///   return the same length for every call.
/// * `initial` - Starting point; projected onto the bounds before use.
/// * `bounds` - Per-parameter `(low, high)` box, aligned with `initial`.
///
/// # Errors
///
/// Returns an error for inconsistent dimensions, an inverted bound, or an
/// empty residual vector. Failure to converge is NOT an error: the result
/// carries `converged = false` with the best parameters reached, so callers
/// can retry or keep the fit.
pub fn bounded_levenberg_marquardt<F>(
    residuals: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    config: &LeastSquaresConfig,
) -> MathResult<LeastSquaresResult>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let n = initial.len();
    if n == 0 {
        return Err(MathError::invalid_input("no parameters to fit"));
    }
    if bounds.len() != n {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: 1,
            rows2: bounds.len(),
            cols2: 1,
        });
    }
    for &(lo, hi) in bounds {
        if lo >= hi {
            return Err(MathError::invalid_input(format!(
                "inverted bound [{lo}, {hi}]"
            )));
        }
    }

    let project = |p: &mut [f64]| {
        for (v, &(lo, hi)) in p.iter_mut().zip(bounds) {
            *v = v.clamp(lo, hi);
        }
    };

    let mut params = initial.to_vec();
    project(&mut params);

    let mut r = DVector::from_vec(residuals(&params));
    let m = r.len();
    if m == 0 {
        return Err(MathError::invalid_input("empty residual vector"));
    }
    let mut sse = r.dot(&r);

    let mut lambda = config.initial_lambda;

    for iteration in 0..config.max_iterations {
        if sse <= config.objective_tolerance {
            return Ok(LeastSquaresResult {
                parameters: params,
                objective: sse,
                iterations: iteration,
                converged: true,
            });
        }

        // Central-difference Jacobian of the residual vector.
        let mut jacobian = DMatrix::zeros(m, n);
        for j in 0..n {
            let h = config.jacobian_step * params[j].abs().max(1.0);

            let mut up = params.clone();
            up[j] += h;
            let r_up = residuals(&up);

            let mut down = params.clone();
            down[j] -= h;
            let r_down = residuals(&down);

            if r_up.len() != m || r_down.len() != m {
                return Err(MathError::invalid_input(
                    "residual length changed during fit",
                ));
            }
            for i in 0..m {
                jacobian[(i, j)] = (r_up[i] - r_down[i]) / (2.0 * h);
            }
        }

        let jtj = jacobian.transpose() * &jacobian;
        let grad = jacobian.transpose() * &r;

        if grad.amax() < config.gradient_tolerance {
            return Ok(LeastSquaresResult {
                parameters: params,
                objective: sse,
                iterations: iteration,
                converged: true,
            });
        }

        // Try damped steps until one reduces the objective.
        let mut accepted = false;
        while lambda <= config.max_lambda {
            // Marquardt scaling: damp the diagonal of JᵀJ, floored so a
            // zero column cannot freeze the system.
            let mut damped = jtj.clone();
            for k in 0..n {
                damped[(k, k)] += lambda * jtj[(k, k)].max(1e-12);
            }

            let Some(delta) = damped.lu().solve(&grad) else {
                lambda *= config.lambda_factor;
                continue;
            };

            let mut candidate = params.clone();
            for k in 0..n {
                candidate[k] -= delta[k];
            }
            project(&mut candidate);

            let r_new = DVector::from_vec(residuals(&candidate));
            if r_new.len() != m {
                return Err(MathError::invalid_input(
                    "residual length changed during fit",
                ));
            }
            let sse_new = r_new.dot(&r_new);

            if sse_new < sse {
                let step_norm: f64 = params
                    .iter()
                    .zip(&candidate)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                let param_norm: f64 = params.iter().map(|p| p * p).sum::<f64>().sqrt();
                let improvement = sse - sse_new;

                params = candidate;
                r = r_new;
                sse = sse_new;
                lambda = (lambda / config.lambda_factor).max(config.min_lambda);
                accepted = true;

                let tiny_step = step_norm <= config.step_tolerance * (1.0 + param_norm);
                let plateau = improvement <= 1e-12 * sse.max(1e-30);
                if tiny_step || plateau {
                    return Ok(LeastSquaresResult {
                        parameters: params,
                        objective: sse,
                        iterations: iteration + 1,
                        converged: true,
                    });
                }
                break;
            }

            lambda *= config.lambda_factor;
        }

        if !accepted {
            // Damping exhausted without progress: the iterate is as good as
            // the Jacobian noise allows.
            return Ok(LeastSquaresResult {
                parameters: params,
                objective: sse,
                iterations: iteration + 1,
                converged: sse <= config.objective_tolerance
                    || grad.amax() < config.gradient_tolerance,
            });
        }
    }

    Ok(LeastSquaresResult {
        parameters: params,
        objective: sse,
        iterations: config.max_iterations,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WIDE: (f64, f64) = (-100.0, 100.0);

    #[test]
    fn test_recovers_quadratic_minimum() {
        // Residuals of (x-2, y-3): global minimum at (2, 3)
        let f = |p: &[f64]| vec![p[0] - 2.0, p[1] - 3.0];
        let result = bounded_levenberg_marquardt(
            f,
            &[0.0, 0.0],
            &[WIDE, WIDE],
            &LeastSquaresConfig::default(),
        )
        .unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-8);
        assert_relative_eq!(result.parameters[1], 3.0, epsilon = 1e-8);
    }

    #[test]
    fn test_nonlinear_exponential_fit() {
        // y = a * exp(-b t) sampled exactly; recover (a, b)
        let ts = [0.0, 0.5, 1.0, 2.0, 4.0, 8.0];
        let truth: (f64, f64) = (1.7, 0.6);
        let data: Vec<f64> = ts.iter().map(|t| truth.0 * (-truth.1 * t).exp()).collect();

        let f = move |p: &[f64]| {
            ts.iter()
                .zip(&data)
                .map(|(t, y)| y - p[0] * (-p[1] * t).exp())
                .collect()
        };

        let result = bounded_levenberg_marquardt(
            f,
            &[1.0, 1.0],
            &[(0.0001, 10.0), (0.0001, 10.0)],
            &LeastSquaresConfig::default(),
        )
        .unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], truth.0, epsilon = 1e-6);
        assert_relative_eq!(result.parameters[1], truth.1, epsilon = 1e-6);
    }

    #[test]
    fn test_respects_bounds() {
        // Unconstrained minimum at x = 5, box caps it at 2
        let f = |p: &[f64]| vec![p[0] - 5.0];
        let result = bounded_levenberg_marquardt(
            f,
            &[0.0],
            &[(-2.0, 2.0)],
            &LeastSquaresConfig::default(),
        )
        .unwrap();

        assert!(result.parameters[0] <= 2.0 + 1e-12);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_initial_point_projected_into_box() {
        let f = |p: &[f64]| vec![p[0] - 1.0];
        let result = bounded_levenberg_marquardt(
            f,
            &[50.0],
            &[(0.0, 2.0)],
            &LeastSquaresConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let f = |p: &[f64]| vec![p[0]];
        let err = bounded_levenberg_marquardt(
            f,
            &[0.0],
            &[(1.0, -1.0)],
            &LeastSquaresConfig::default(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let f = |p: &[f64]| vec![p[0]];
        let err =
            bounded_levenberg_marquardt(f, &[0.0, 1.0], &[WIDE], &LeastSquaresConfig::default());
        assert!(matches!(err, Err(MathError::DimensionMismatch { .. })));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_result_stays_inside_bounds(
                target in -10.0f64..10.0,
                start in -10.0f64..10.0,
                lo in -5.0f64..-0.1,
                hi in 0.1f64..5.0,
            ) {
                let f = move |p: &[f64]| vec![p[0] - target];
                let result = bounded_levenberg_marquardt(
                    f,
                    &[start],
                    &[(lo, hi)],
                    &LeastSquaresConfig::default(),
                )
                .unwrap();
                prop_assert!(result.parameters[0] >= lo - 1e-12);
                prop_assert!(result.parameters[0] <= hi + 1e-12);
            }

            #[test]
            fn prop_recovers_interior_linear_target(
                a in -3.0f64..3.0,
                b in -3.0f64..3.0,
            ) {
                // Separable linear residuals with the minimum inside the box
                let f = move |p: &[f64]| vec![p[0] - a, p[1] - b];
                let result = bounded_levenberg_marquardt(
                    f,
                    &[0.0, 0.0],
                    &[(-5.0, 5.0), (-5.0, 5.0)],
                    &LeastSquaresConfig::default(),
                )
                .unwrap();
                prop_assert!(result.converged);
                prop_assert!((result.parameters[0] - a).abs() < 1e-6);
                prop_assert!((result.parameters[1] - b).abs() < 1e-6);
            }
        }
    }
}
