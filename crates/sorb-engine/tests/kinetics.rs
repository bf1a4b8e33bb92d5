//! Averaged coverage against known adsorption kinetics.
//!
//! On a ring, monomer coverage follows `1 - e^-t`; dimers jam at
//! `1 - e^-2`; nearest-neighbour exclusion jams at `(1 - e^-2) / 2`.
//! On the square lattice, dimers jam near 0.9068 and exclusion near
//! 0.3641.

use sorb_core::{Boundary, Model};
use sorb_engine::{SimConfig, Simulation, StopCondition};
use sorb_stats::{Metric, Report};

fn run(mut config: SimConfig, time: f64, repetitions: u32) -> Report {
    config.stop = StopCondition::Time(time);
    config.repetitions = repetitions;
    config.seed = 77;
    Simulation::new(config).unwrap().run_to_end().unwrap()
}

fn final_coverage(report: &Report) -> f64 {
    report.final_value(Metric::Coverage).unwrap()
}

#[test]
fn monomer_coverage_follows_exponential() {
    let report = run(
        SimConfig::line(1000, Boundary::Periodic, Model::Monomer),
        1.0,
        20,
    );
    let expected = 1.0 - (-1.0f64).exp();
    let got = final_coverage(&report);
    assert!((got - expected).abs() < 0.02, "coverage {got}");
}

#[test]
fn dimer_line_jams() {
    let report = run(
        SimConfig::line(1000, Boundary::Periodic, Model::Dimer),
        30.0,
        10,
    );
    let expected = 1.0 - (-2.0f64).exp();
    let got = final_coverage(&report);
    assert!((got - expected).abs() < 0.015, "coverage {got}");
}

#[test]
fn exclusion_line_jams() {
    let report = run(
        SimConfig::line(1000, Boundary::Periodic, Model::NearestNeighborExclusion),
        30.0,
        10,
    );
    let expected = (1.0 - (-2.0f64).exp()) / 2.0;
    let got = final_coverage(&report);
    assert!((got - expected).abs() < 0.015, "coverage {got}");
}

#[test]
fn dimer_grid_jams() {
    let config = SimConfig::grid(40, 40, Boundary::Periodic, Boundary::Periodic, Model::Dimer);
    let got = final_coverage(&run(config, 40.0, 5));
    assert!((got - 0.9068).abs() < 0.02, "coverage {got}");
}

#[test]
fn exclusion_grid_jams() {
    let config = SimConfig::grid(
        40,
        40,
        Boundary::Periodic,
        Boundary::Periodic,
        Model::NearestNeighborExclusion,
    );
    let got = final_coverage(&run(config, 40.0, 5));
    assert!((got - 0.3641).abs() < 0.02, "coverage {got}");
}

#[test]
fn coverage_never_decreases() {
    let report = run(
        SimConfig::line(300, Boundary::Open, Model::Dimer),
        5.0,
        4,
    );
    let series = report.series(Metric::Coverage).unwrap();
    for pair in series.windows(2) {
        assert!(pair[0].0 < pair[1].0);
        assert!(pair[0].1 <= pair[1].1);
    }
}

#[test]
fn single_gaps_complement_coverage() {
    let report = run(
        SimConfig::line(250, Boundary::Open, Model::NearestNeighborExclusion),
        2.0,
        3,
    );
    let coverage = report.series(Metric::Coverage).unwrap();
    let empty = report.series(Metric::EmptySingle).unwrap();
    assert_eq!(coverage.len(), empty.len());
    for (c, e) in coverage.iter().zip(empty) {
        assert_eq!(c.0, e.0);
        assert!((c.1 + e.1 - 1.0).abs() < 1e-12);
    }
}

#[test]
fn grids_skip_run_series_by_default() {
    let config = SimConfig::grid(10, 10, Boundary::Open, Boundary::Open, Model::Monomer);
    let report = run(config.clone(), 1.0, 1);
    assert!(report.series(Metric::EmptySingle).is_none());

    let mut tracked = config;
    tracked.track_empty_runs = Some(true);
    let report = run(tracked, 1.0, 1);
    assert!(report.series(Metric::EmptyTriple).is_some());
}
