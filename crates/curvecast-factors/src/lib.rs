//! # Curvecast Factors
//!
//! Principal-component factor extraction from day-over-day yield changes.
//!
//! The factor model decomposes the change series into a small set of
//! orthogonal, variance-ranked components (the familiar level / slope /
//! curvature triple for Treasury curves), with a deterministic sign
//! convention so results reproduce across runs.

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

pub mod engine;
pub mod error;
pub mod model;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::PcaEngine;
    pub use crate::error::{FactorError, FactorResult};
    pub use crate::model::FactorModel;
}

pub use error::{FactorError, FactorResult};
