//! The simulation driver.
//!
//! [`Simulation`] owns the lattice, the rule, the per-repetition
//! statistics, the running aggregate, and the RNG. All mutating methods
//! take `&mut self`; nothing is shared between threads.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──▶ Running(0) ──▶ RepetitionComplete(0) ──▶ Running(1) ──▶ … ──▶ AllComplete
//! ```
//!
//! [`run_repetition()`](Simulation::run_repetition) advances one arrow
//! through `RepetitionComplete`; [`run_with()`](Simulation::run_with) loops
//! until `AllComplete`; [`finish()`](Simulation::finish) consumes the
//! driver and normalizes the aggregate into a [`Report`].
//!
//! # Checkpoints
//!
//! With `checkpoint_interval = Some(k)`, a [`Checkpoint`] is handed to the
//! store after every attempt whose count within the repetition is a
//! multiple of `k`. [`Simulation::resume()`] rebuilds the driver from one
//! and continues as if the run had never stopped.

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sorb_checkpoint::{Checkpoint, CheckpointStore, NullStore, RngState};
use sorb_core::RepetitionId;
use sorb_lattice::Lattice;
use sorb_rules::{AdsorptionRule, Rule};
use sorb_stats::{Report, ResultsAggregator, Statistics};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SimConfig};
use crate::error::RunError;

// Compile-time assertion: Simulation can be moved to a worker thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── DriverState ────────────────────────────────────────────────────

/// Observable position of a [`Simulation`] in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, no attempt made yet.
    Idle,
    /// Inside a repetition.
    Running {
        /// Repetition in progress.
        repetition: RepetitionId,
        /// Attempts made so far in it.
        attempts: u64,
    },
    /// A repetition has been summed; the next one has not started.
    RepetitionComplete {
        /// The repetition just finished.
        repetition: RepetitionId,
    },
    /// Every repetition has been summed.
    AllComplete,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running {
                repetition,
                attempts,
            } => write!(f, "running repetition {repetition} at attempt {attempts}"),
            Self::RepetitionComplete { repetition } => {
                write!(f, "repetition {repetition} complete")
            }
            Self::AllComplete => write!(f, "all repetitions complete"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    RepetitionComplete,
    AllComplete,
}

/// Generator for repetition `repetition` of a run seeded with `seed`.
///
/// Every repetition gets its own ChaCha stream under the same key, so
/// repetitions are independent and individually reproducible.
pub fn repetition_rng(seed: u64, repetition: RepetitionId) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(repetition.0));
    rng
}

// ── Simulation ─────────────────────────────────────────────────────

/// A configured, resumable adsorption run.
///
/// # Examples
///
/// ```
/// use sorb_core::{Boundary, Model};
/// use sorb_engine::{SimConfig, Simulation, StopCondition};
/// use sorb_stats::Metric;
///
/// let mut config = SimConfig::line(200, Boundary::Periodic, Model::Monomer);
/// config.stop = StopCondition::Time(1.0);
/// config.repetitions = 4;
///
/// let report = Simulation::new(config)?.run_to_end()?;
/// assert_eq!(report.simulations(), 4);
/// let coverage = report.final_value(Metric::Coverage).unwrap();
/// assert!(coverage > 0.5 && coverage < 0.75);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Simulation {
    config: SimConfig,
    config_hash: u64,
    lattice: Lattice,
    rule: AdsorptionRule,
    statistics: Statistics,
    aggregator: ResultsAggregator,
    rng: ChaCha8Rng,
    repetition: RepetitionId,
    phase: Phase,
}

impl Simulation {
    /// Validate `config` and build an idle driver.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (lattice, rule) = config.build()?;
        let statistics = Statistics::for_lattice(&lattice, config.tracks_empty_runs());
        Ok(Self {
            config_hash: config.config_hash(),
            rng: repetition_rng(config.seed, RepetitionId(0)),
            config,
            lattice,
            rule,
            statistics,
            aggregator: ResultsAggregator::new(),
            repetition: RepetitionId(0),
            phase: Phase::Idle,
        })
    }

    /// Rebuild a driver from `checkpoint` under `config`.
    ///
    /// # Errors
    ///
    /// [`RunError::Config`] if `config` is invalid, and
    /// [`RunError::Checkpoint`] if the checkpoint was produced by a run
    /// with different extents, boundaries, model, seed, repetitions, or
    /// stop condition.
    pub fn resume(config: SimConfig, checkpoint: Checkpoint) -> Result<Self, RunError> {
        config.validate()?;
        let config_hash = config.config_hash();
        if let Err(e) = checkpoint.verify(&config.identity()) {
            warn!(error = %e, "checkpoint rejected");
            return Err(e.into());
        }
        let rule = AdsorptionRule::new(config.model, &checkpoint.lattice).map_err(ConfigError::from)?;
        info!(
            repetition = checkpoint.repetition.0,
            attempts = checkpoint.attempts(),
            "resuming from checkpoint"
        );
        // Only an idle driver captures the first repetition before any attempt.
        let phase = if checkpoint.repetition.0 == 0 && checkpoint.attempts() == 0 {
            Phase::Idle
        } else {
            Phase::Running
        };
        Ok(Self {
            config,
            config_hash,
            rng: checkpoint.rng.restore(),
            lattice: checkpoint.lattice,
            rule,
            statistics: checkpoint.statistics,
            aggregator: checkpoint.aggregator,
            repetition: checkpoint.repetition,
            phase,
        })
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// The configuration this driver runs.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current lattice occupancy.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The active rule.
    pub fn rule(&self) -> &AdsorptionRule {
        &self.rule
    }

    /// Statistics of the current (or last finished) repetition.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Sums over finished repetitions.
    pub fn aggregator(&self) -> &ResultsAggregator {
        &self.aggregator
    }

    /// Where the driver is in its lifecycle.
    pub fn state(&self) -> DriverState {
        match self.phase {
            Phase::Idle => DriverState::Idle,
            Phase::Running => DriverState::Running {
                repetition: self.repetition,
                attempts: self.statistics.attempts(),
            },
            Phase::RepetitionComplete => DriverState::RepetitionComplete {
                repetition: self.repetition,
            },
            Phase::AllComplete => DriverState::AllComplete,
        }
    }

    // ── Execution ──────────────────────────────────────────────────

    /// Make one attempt, starting the next repetition if needed.
    ///
    /// Returns whether the attempt adsorbed, or `None` once every
    /// repetition is complete. The stop condition is not consulted; use
    /// [`run_repetition()`](Self::run_repetition) to close a repetition.
    pub fn step(&mut self) -> Option<bool> {
        if !self.enter_repetition() {
            return None;
        }
        Some(self.attempt())
    }

    /// Run the current repetition until its stop condition holds, then
    /// add its statistics to the aggregate.
    ///
    /// Returns the finished repetition, or `None` if every repetition was
    /// already complete.
    pub fn run_repetition(
        &mut self,
        store: &mut dyn CheckpointStore,
    ) -> Result<Option<RepetitionId>, RunError> {
        if !self.enter_repetition() {
            return Ok(None);
        }
        let sites = self.statistics.site_count();
        while self
            .config
            .stop
            .should_continue(self.statistics.attempts(), sites)
        {
            self.attempt();
            if let Some(interval) = self.config.checkpoint_interval {
                let attempts = self.statistics.attempts();
                if attempts % interval == 0 {
                    store.save(&self.capture())?;
                    debug!(
                        repetition = self.repetition.0,
                        attempts, "checkpoint saved"
                    );
                }
            }
        }

        self.aggregator.add(&self.statistics)?;
        let finished = self.repetition;
        info!(
            repetition = finished.0,
            attempts = self.statistics.attempts(),
            successful = self.statistics.successful(),
            coverage = self.lattice.coverage(),
            "repetition complete"
        );
        if finished.0 + 1 >= self.config.repetitions {
            self.phase = Phase::AllComplete;
            info!(
                repetitions = self.config.repetitions,
                model = %self.config.model,
                "all repetitions complete"
            );
        } else {
            self.phase = Phase::RepetitionComplete;
        }
        Ok(Some(finished))
    }

    /// Run every remaining repetition, saving checkpoints to `store`.
    pub fn run_with(&mut self, store: &mut dyn CheckpointStore) -> Result<(), RunError> {
        while self.run_repetition(store)?.is_some() {}
        Ok(())
    }

    /// Run to completion with `store` and produce the report.
    pub fn run(mut self, store: &mut dyn CheckpointStore) -> Result<Report, RunError> {
        self.run_with(store)?;
        self.finish()
    }

    /// Run to completion without checkpointing and produce the report.
    pub fn run_to_end(self) -> Result<Report, RunError> {
        self.run(&mut NullStore)
    }

    /// Normalize the aggregate of a completed run.
    ///
    /// # Errors
    ///
    /// [`RunError::NotFinished`] unless the driver is
    /// [`DriverState::AllComplete`].
    pub fn finish(self) -> Result<Report, RunError> {
        if self.phase != Phase::AllComplete {
            return Err(RunError::NotFinished {
                state: self.state(),
            });
        }
        Ok(self.aggregator.process()?)
    }

    /// Capture the resumable state.
    ///
    /// `None` between repetitions and after the last one: a checkpoint
    /// always describes a repetition that is about to run or in progress.
    pub fn checkpoint(&self) -> Option<Checkpoint> {
        match self.phase {
            Phase::Idle | Phase::Running => Some(self.capture()),
            Phase::RepetitionComplete | Phase::AllComplete => None,
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Move into `Running`, starting a fresh repetition when leaving
    /// `Idle` or `RepetitionComplete`. False once the run is complete.
    fn enter_repetition(&mut self) -> bool {
        match self.phase {
            Phase::Running => true,
            Phase::AllComplete => false,
            Phase::Idle => {
                self.begin_repetition();
                true
            }
            Phase::RepetitionComplete => {
                self.repetition = self.repetition.next();
                self.begin_repetition();
                true
            }
        }
    }

    fn begin_repetition(&mut self) {
        self.lattice.reset();
        self.statistics.reset();
        self.rng = repetition_rng(self.config.seed, self.repetition);
        self.phase = Phase::Running;
        info!(
            repetition = self.repetition.0,
            of = self.config.repetitions,
            "repetition started"
        );
    }

    fn attempt(&mut self) -> bool {
        let attempt = self.rule.propose(&self.lattice, &mut self.rng);
        let adsorbed = self.rule.validate_and_apply(&mut self.lattice, &attempt);
        self.statistics.record(&self.lattice, adsorbed);
        adsorbed
    }

    fn capture(&self) -> Checkpoint {
        Checkpoint {
            config_hash: self.config_hash,
            seed: self.config.seed,
            model: self.config.model,
            repetitions: self.config.repetitions,
            repetition: self.repetition,
            lattice: self.lattice.clone(),
            statistics: self.statistics.clone(),
            aggregator: self.aggregator.clone(),
            rng: RngState::capture(&self.rng),
        }
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("coverage", &self.lattice.coverage())
            .finish_non_exhaustive()
    }
}
