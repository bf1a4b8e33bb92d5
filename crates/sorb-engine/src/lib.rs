//! Simulation driver for Sorb lattice adsorption runs.
//!
//! [`SimConfig`] describes a run; [`Simulation`] executes it. Each
//! repetition starts from an empty lattice, repeatedly asks the model's
//! rule for an attempt, applies it, and records statistics until the
//! [`StopCondition`] is met. Finished repetitions are summed into a
//! [`ResultsAggregator`](sorb_stats::ResultsAggregator) and finally
//! normalized into a [`Report`](sorb_stats::Report).
//!
//! # Determinism
//!
//! Repetition `n` draws from `ChaCha8Rng::seed_from_u64(seed)` on stream
//! `n`. Results depend only on the configuration, never on wall-clock
//! time, and a run resumed from a [`Checkpoint`](sorb_checkpoint::Checkpoint)
//! reproduces the uninterrupted run exactly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;

pub use config::{ConfigError, SimConfig, StopCondition};
pub use driver::{repetition_rng, DriverState, Simulation};
pub use error::RunError;
