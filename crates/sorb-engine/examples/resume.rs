//! Interrupt a run and pick it up again from a checkpoint file.
//!
//! Demonstrates:
//!   1. Saving checkpoints to a FileStore on a fixed cadence
//!   2. Stopping partway through the run
//!   3. Loading the file and resuming with Simulation::resume
//!   4. Confirming the resumed report matches an uninterrupted one
//!
//! Run with:
//!   cargo run --example resume

use sorb_checkpoint::{CheckpointStore, FileStore};
use sorb_core::{Boundary, Model};
use sorb_engine::{SimConfig, Simulation, StopCondition};
use tracing_subscriber::EnvFilter;

fn config() -> SimConfig {
    let mut config = SimConfig::grid(
        32,
        32,
        Boundary::Periodic,
        Boundary::Periodic,
        Model::NearestNeighborExclusion,
    );
    config.stop = StopCondition::Time(4.0);
    config.repetitions = 4;
    config.seed = 7;
    config.checkpoint_interval = Some(1_000);
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::temp_dir().join("sorb-resume-example.ckpt");
    let mut store = FileStore::new(&path);

    // First session: two repetitions, then a few thousand attempts of
    // the third before "crashing".
    let mut first = Simulation::new(config())?;
    first.run_repetition(&mut store)?;
    first.run_repetition(&mut store)?;
    for _ in 0..2_500 {
        first.step();
    }
    if let Some(checkpoint) = first.checkpoint() {
        store.save(&checkpoint)?;
    }
    drop(first);

    // Second session.
    let checkpoint = store.load()?.ok_or("no checkpoint written")?;
    println!(
        "resuming repetition {} at attempt {}",
        checkpoint.repetition,
        checkpoint.attempts()
    );
    let resumed = Simulation::resume(config(), checkpoint)?.run(&mut store)?;

    let reference = Simulation::new(config())?.run_to_end()?;
    println!("{resumed}");
    println!("matches uninterrupted run: {}", resumed == reference);

    std::fs::remove_file(&path)?;
    Ok(())
}
