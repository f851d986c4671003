//! # Curvecast Risk
//!
//! Portfolio tail-risk metrics over simulated curve scenarios.
//!
//! The engine maps tenor-level sensitivities onto each scenario curve,
//! collects the resulting P&L distribution, and reports Value at Risk and
//! Expected Shortfall at a configurable confidence level. A zero-coupon
//! ladder module provides exact full revaluation alongside the linear
//! sensitivity view.

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
pub mod ladder;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{RiskEngine, RiskMetrics};
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::ladder::{ladder_pnl, ladder_value, zcb_price};
}

pub use error::{RiskError, RiskResult};
