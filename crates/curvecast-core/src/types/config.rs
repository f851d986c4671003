//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Configuration surface consumed by the analytics pipeline.
///
/// Builder-style setters keep call sites readable:
///
/// ```rust
/// use curvecast_core::types::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_n_scenarios(5_000)
///     .with_seed(7)
///     .with_alpha(0.99);
/// assert_eq!(config.n_scenarios, 5_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// History window length in trading days.
    pub n_days: usize,
    /// Number of PCA components to extract.
    pub n_components: usize,
    /// Number of scenarios to generate.
    pub n_scenarios: usize,
    /// Base seed for scenario sampling.
    pub seed: u64,
    /// Confidence level for VaR / ES, in (0, 1).
    pub alpha: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            n_days: 250,
            n_components: 3,
            n_scenarios: 1_000,
            seed: 42,
            alpha: 0.95,
        }
    }
}

impl EngineConfig {
    /// Sets the history window length.
    #[must_use]
    pub fn with_n_days(mut self, n_days: usize) -> Self {
        self.n_days = n_days;
        self
    }

    /// Sets the PCA component count.
    #[must_use]
    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.n_components = n_components;
        self
    }

    /// Sets the scenario count.
    #[must_use]
    pub fn with_n_scenarios(mut self, n_scenarios: usize) -> Self {
        self.n_scenarios = n_scenarios;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the confidence level.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Validates the configuration as a whole.
    pub fn validate(&self) -> CoreResult<()> {
        if self.n_days < 2 {
            return Err(CoreError::invalid_config("n_days must be at least 2"));
        }
        if self.n_components == 0 {
            return Err(CoreError::invalid_config("n_components must be positive"));
        }
        if self.n_scenarios == 0 {
            return Err(CoreError::invalid_config("n_scenarios must be positive"));
        }
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(CoreError::invalid_config(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
