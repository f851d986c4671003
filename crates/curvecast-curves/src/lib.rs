//! # Curvecast Curves
//!
//! Per-date Nelson-Siegel curve fitting and the day-over-day yield change
//! series derived from a curve history.
//!
//! The two stages here are independent consumers of the same history:
//! fitted parameters feed diagnostics, the change series feeds the factor
//! model and scenario generation downstream.

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
#![allow(clippy::needless_pass_by_value)]

pub mod changes;
pub mod error;
pub mod fitter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::changes::ChangeSeries;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::fitter::{CurveFitter, FitterConfig, NelsonSiegelParams};
}

pub use error::{CurveError, CurveResult};
