//! Sorb Quickstart: dimer adsorption on a ring.
//!
//! Demonstrates:
//!   1. Building a SimConfig for a periodic 1D lattice
//!   2. Running every repetition to completion
//!   3. Printing the averaged report
//!
//! Run with:
//!   cargo run --example quickstart
//!
//! Set `RUST_LOG=debug` to see per-repetition progress.

use sorb_core::{Boundary, Model};
use sorb_engine::{SimConfig, Simulation, StopCondition};
use sorb_stats::Metric;
use tracing_subscriber::EnvFilter;

// ─── Run parameters ─────────────────────────────────────────────

const SITES: u32 = 1_000;
const MAX_TIME: f64 = 5.0;
const REPETITIONS: u32 = 20;
const SEED: u64 = 42;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = SimConfig::line(SITES, Boundary::Periodic, Model::Dimer);
    config.stop = StopCondition::Time(MAX_TIME);
    config.repetitions = REPETITIONS;
    config.seed = SEED;

    let report = Simulation::new(config)?.run_to_end()?;
    println!("{report}");

    if let Some(coverage) = report.final_value(Metric::Coverage) {
        let jamming = 1.0 - (-2.0f64).exp();
        println!("final coverage {coverage:.4} (jamming limit {jamming:.4})");
    }
    Ok(())
}
