//! The standard Treasury tenor grid.
//!
//! All curve history is observed on the fixed 13-point constant-maturity
//! set published daily by the US Treasury, expressed in year units.

/// The standard 13-point tenor grid as `(label, years)` pairs.
///
/// Month tenors use exact twelfths so that labels round-trip to the same
/// year fraction everywhere in the pipeline.
pub const STANDARD_TENORS: [(&str, f64); 13] = [
    ("1 Mo", 1.0 / 12.0),
    ("2 Mo", 2.0 / 12.0),
    ("3 Mo", 3.0 / 12.0),
    ("4 Mo", 4.0 / 12.0),
    ("6 Mo", 6.0 / 12.0),
    ("1 Yr", 1.0),
    ("2 Yr", 2.0),
    ("3 Yr", 3.0),
    ("5 Yr", 5.0),
    ("7 Yr", 7.0),
    ("10 Yr", 10.0),
    ("20 Yr", 20.0),
    ("30 Yr", 30.0),
];

/// Looks up the year fraction for a standard tenor label.
///
/// Returns `None` for labels outside the standard grid.
#[must_use]
pub fn tenor_years(label: &str) -> Option<f64> {
    STANDARD_TENORS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, y)| *y)
}

/// Returns the index of the grid tenor closest to `target` (in years).
///
/// Ties resolve to the shorter tenor. Panics only on an empty grid, which
/// validated snapshots rule out.
#[must_use]
pub fn nearest_tenor(target: f64, tenors: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &t) in tenors.iter().enumerate() {
        let dist = (t - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
