//! # Curvecast Core
//!
//! Core types for the Curvecast yield curve analytics library.
//!
//! This crate provides the foundational building blocks used throughout
//! Curvecast:
//!
//! - **Types**: `CurveSnapshot`, `Portfolio`, the standard tenor grid
//! - **Configuration**: the `EngineConfig` consumed by the pipeline stages
//! - **Errors**: the shared `CoreError` type
//!
//! ## Design Philosophy
//!
//! - **Immutable Snapshots**: curve observations are validated once at
//!   construction and never mutated afterwards
//! - **Explicit Over Implicit**: every stage receives its inputs as
//!   arguments; no component reads ambient state

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
#![allow(clippy::manual_range_contains)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        nearest_tenor, tenor_years, CurveSnapshot, EngineConfig, Portfolio, Position,
        STANDARD_TENORS,
    };
}

pub use error::{CoreError, CoreResult};
