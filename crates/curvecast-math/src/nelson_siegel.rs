//! The Nelson-Siegel parametric yield curve model.
//!
//! The model summarizes a full curve with four parameters:
//!
//! ```text
//! y(t) = β₀ + β₁ * ((1 - e^(-t/τ)) / (t/τ))
//!           + β₂ * ((1 - e^(-t/τ)) / (t/τ) - e^(-t/τ))
//! ```
//!
//! Where:
//! - β₀: long-term level (asymptotic yield)
//! - β₁: short-term component (slope)
//! - β₂: medium-term component (curvature/hump)
//! - τ: decay factor (controls where the hump occurs)

use crate::error::{MathError, MathResult};

/// A Nelson-Siegel curve shape.
///
/// # Financial Interpretation
///
/// - β₀: long-run equilibrium yield
/// - β₀ + β₁: instantaneous short yield (as t → 0)
/// - β₂ > 0: hump in curve; β₂ < 0: U-shape
/// - τ: time to maximum hump effect (~1-3 years typical)
///
/// # Example
///
/// ```rust
/// use curvecast_math::nelson_siegel::NelsonSiegel;
///
/// let ns = NelsonSiegel::new(0.045, -0.02, 0.01, 2.0).unwrap();
/// let short = ns.yield_at(0.25);
/// let long = ns.yield_at(30.0);
/// assert!(short < long);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelsonSiegel {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    tau: f64,
}

impl NelsonSiegel {
    /// Creates a new Nelson-Siegel curve.
    ///
    /// # Errors
    ///
    /// Returns an error if tau is not positive.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, tau: f64) -> MathResult<Self> {
        if tau <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "tau must be positive, got {tau}"
            )));
        }
        Ok(Self {
            beta0,
            beta1,
            beta2,
            tau,
        })
    }

    /// Returns the model parameters as (β₀, β₁, β₂, τ).
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        (self.beta0, self.beta1, self.beta2, self.tau)
    }

    /// Evaluates the modeled yield at tenor `t` (years, decimal output).
    ///
    /// As t → 0 the model tends to β₀ + β₁.
    pub fn yield_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.beta0 + self.beta1;
        }
        let x = t / self.tau;
        self.beta0
            + self.beta1 * Self::loading_slope(x)
            + self.beta2 * Self::loading_curvature(x)
    }

    /// Evaluates the model over a tenor grid.
    pub fn yields(&self, tenors: &[f64]) -> Vec<f64> {
        tenors.iter().map(|&t| self.yield_at(t)).collect()
    }

    /// Slope loading `(1 - e^(-x)) / x`.
    ///
    /// Taylor expansion near zero keeps the loading finite and smooth.
    pub fn loading_slope(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            1.0 - x / 2.0 + x * x / 6.0
        } else {
            (1.0 - (-x).exp()) / x
        }
    }

    /// Curvature loading `(1 - e^(-x)) / x - e^(-x)`.
    pub fn loading_curvature(x: f64) -> f64 {
        if x.abs() < 1e-10 {
            x / 2.0 - x * x / 3.0
        } else {
            Self::loading_slope(x) - (-x).exp()
        }
    }
}
