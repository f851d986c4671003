//! Domain types shared by all pipeline stages.

mod config;
mod portfolio;
mod snapshot;
mod tenor;

pub use config::EngineConfig;
pub use portfolio::{Portfolio, Position};
pub use snapshot::CurveSnapshot;
pub use tenor::{nearest_tenor, tenor_years, STANDARD_TENORS};
