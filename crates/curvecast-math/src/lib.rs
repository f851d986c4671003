//! # Curvecast Math
//!
//! Numerical routines for the Curvecast yield curve analytics library.
//!
//! This crate provides:
//!
//! - **Nelson-Siegel**: the 4-parameter parametric curve model
//! - **Least Squares**: bounded Levenberg-Marquardt minimization
//! - **Statistics**: column means, sample covariance, sorted symmetric
//!   eigen-decomposition, and a PSD matrix square root
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Taylor fallbacks near `x = 0`, explicit
//!   tolerances for degenerate matrices
//! - **No Hidden State**: every routine is a pure function of its inputs

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
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::items_after_statements)]

pub mod error;
pub mod least_squares;
pub mod nelson_siegel;
pub mod stats;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::least_squares::{
        bounded_levenberg_marquardt, LeastSquaresConfig, LeastSquaresResult,
    };
    pub use crate::nelson_siegel::NelsonSiegel;
    pub use crate::stats::{
        center_columns, column_means, psd_sqrt, sample_covariance, sorted_symmetric_eigen,
    };
}

pub use error::{MathError, MathResult};
