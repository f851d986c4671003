//! End-to-end pipeline tests: observed curves through fitting, factor
//! extraction, scenario generation, and risk aggregation.

use approx::assert_relative_eq;
use chrono::NaiveDate;

use curvecast_core::types::{CurveSnapshot, EngineConfig, Portfolio, STANDARD_TENORS};
use curvecast_curves::changes::ChangeSeries;
use curvecast_curves::fitter::CurveFitter;
use curvecast_factors::engine::PcaEngine;
use curvecast_risk::engine::RiskEngine;
use curvecast_scenarios::generator::ScenarioGenerator;

fn standard_grid() -> Vec<f64> {
    STANDARD_TENORS.iter().map(|(_, y)| *y).collect()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
}

fn snapshot(d: u32, yields: Vec<f64>) -> CurveSnapshot {
    CurveSnapshot::new(date(d), standard_grid(), yields).unwrap()
}

/// A flat curve is a degenerate but valid input to every stage: the fit is
/// exact, the change series is all zero, the factor model has no variance,
/// every historical scenario equals the base curve, and risk is zero.
#[test]
fn test_flat_curve_pipeline() {
    let flat: Vec<f64> = vec![0.02; standard_grid().len()];
    let history: Vec<CurveSnapshot> = (1..=5).map(|d| snapshot(d, flat.clone())).collect();

    // Fitting: the flat curve is exactly beta0 = 0.02, no slope, no hump
    let fits = CurveFitter::new().fit_history(&history).unwrap();
    assert_eq!(fits.len(), 5);
    for fit in &fits {
        assert!(fit.converged);
        assert_relative_eq!(fit.beta0, 0.02, epsilon = 1e-6);
        assert_relative_eq!(fit.beta1, 0.0, epsilon = 1e-6);
        assert_relative_eq!(fit.beta2, 0.0, epsilon = 1e-6);
    }

    // Changes: all zero
    let changes = ChangeSeries::from_snapshots(&history).unwrap();
    for row in changes.rows() {
        for &v in row {
            assert_relative_eq!(v, 0.0);
        }
    }

    // Factors: zero variance must not crash, loadings zero-filled
    let model = PcaEngine::new().fit(&changes, 3).unwrap();
    assert_eq!(model.effective_rank(), 0);
    for row in model.loadings() {
        for &v in row {
            assert_relative_eq!(v, 0.0);
        }
    }

    // Scenarios: every historical draw reproduces the base curve
    let base = history[4].clone();
    let config = EngineConfig::default().with_n_scenarios(200);
    let set = ScenarioGenerator::from_config(&config)
        .historical(&base, &changes)
        .unwrap();
    assert_eq!(set.len(), 200);
    for scenario in set.scenarios() {
        assert_eq!(scenario.curve().yields(), base.yields());
    }

    // Risk: zero P&L distribution, zero tail metrics
    let portfolio = Portfolio::single(10.0, 250_000.0).unwrap();
    let metrics = RiskEngine::new().run(&set, &portfolio, config.alpha).unwrap();
    assert_relative_eq!(metrics.var(), 0.0);
    assert_relative_eq!(metrics.es(), 0.0);
    for &pnl in metrics.pnl() {
        assert_relative_eq!(pnl, 0.0);
    }
}

/// A moving history exercises the full pipeline with non-trivial numbers.
#[test]
fn test_moving_history_pipeline() {
    let grid = standard_grid();
    let mut level: f64 = 0.035;
    let mut slope: f64 = 0.008;
    let mut history = Vec::new();

    let moves = [
        (0.0012, -0.0003),
        (-0.0008, 0.0006),
        (0.0005, -0.0009),
        (-0.0015, 0.0002),
        (0.0009, 0.0004),
        (-0.0004, -0.0007),
        (0.0011, 0.0001),
        (-0.0006, 0.0005),
        (0.0003, -0.0004),
    ];
    for (d, &(dl, ds)) in std::iter::once(&(0.0, 0.0)).chain(moves.iter()).enumerate() {
        level += dl;
        slope += ds;
        let yields: Vec<f64> = grid
            .iter()
            .map(|&t| level + slope * (-t / 10.0).exp())
            .collect();
        history.push(snapshot(d as u32 + 1, yields));
    }

    let fits = CurveFitter::new().fit_history(&history).unwrap();
    assert_eq!(fits.len(), history.len());
    for fit in &fits {
        assert!(fit.within_bounds());
        assert!(fit.residual_norm < 0.01);
    }

    let changes = ChangeSeries::from_snapshots(&history).unwrap();
    let model = PcaEngine::new().fit(&changes, 3).unwrap();
    // Two driving factors: level and an exponential slope shape
    assert!(model.explained_variance_ratio()[0] + model.explained_variance_ratio()[1] > 0.99);

    let base = history[history.len() - 1].clone();
    let generator = ScenarioGenerator::new(500, 42);

    let portfolio = Portfolio::new(vec![
        curvecast_core::types::Position::new(2.0, 180_000.0),
        curvecast_core::types::Position::new(10.0, -40_000.0),
        curvecast_core::types::Position::new(30.0, 95_000.0),
    ])
    .unwrap();

    let engine = RiskEngine::new();
    for set in [
        generator.historical(&base, &changes).unwrap(),
        generator.parametric(&base, &changes).unwrap(),
        generator.parametric_in_factor_space(&base, &model).unwrap(),
    ] {
        assert_eq!(set.len(), 500);
        assert_eq!(set.dropped(), 0);

        let metrics = engine.run(&set, &portfolio, 0.95).unwrap();
        assert!(metrics.var().is_finite());
        assert!(metrics.es() >= metrics.var() - 1e-12);
        assert!(!metrics.low_confidence());
        assert_eq!(metrics.pnl().len(), 500);
    }
}

/// Fixed seed, fixed inputs: the whole pipeline output is bit-identical.
#[test]
fn test_pipeline_reproducibility() {
    let grid = standard_grid();
    let mut yields: Vec<f64> = grid.iter().map(|&t| 0.03 + 0.002 * t.ln_1p()).collect();
    let mut history = vec![snapshot(1, yields.clone())];
    for d in 2..=8 {
        for (j, y) in yields.iter_mut().enumerate() {
            *y += 0.0004 * f64::from(d % 3) - 0.0003 + 0.0001 * (j as f64 / 13.0);
        }
        history.push(snapshot(d as u32, yields.clone()));
    }

    let changes = ChangeSeries::from_snapshots(&history).unwrap();
    let base = history[history.len() - 1].clone();
    let portfolio = Portfolio::single(5.0, 1_000_000.0).unwrap();

    let run = || {
        let set = ScenarioGenerator::new(300, 7).parametric(&base, &changes).unwrap();
        RiskEngine::new().run(&set, &portfolio, 0.99).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}
