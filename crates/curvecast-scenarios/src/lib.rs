//! # Curvecast Scenarios
//!
//! Simulated future yield curves from a base curve and its change history.
//!
//! Two generation modes share one deterministic random stream: historical
//! resampling of observed change rows, and parametric sampling from a
//! Gaussian fitted to those rows (optionally in factor space). A fixed
//! seed reproduces a scenario set bit for bit.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod generator;
pub mod summary;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::generator::{Scenario, ScenarioGenerator, ScenarioMethod, ScenarioSet};
    pub use crate::summary::{summarize, ScenarioSummary};
}

pub use error::{ScenarioError, ScenarioResult};
