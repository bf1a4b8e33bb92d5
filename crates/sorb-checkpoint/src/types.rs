//! Checkpoint payload types.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sorb_core::{Boundary, Model, RepetitionId};
use sorb_lattice::Lattice;
use sorb_stats::{ResultsAggregator, Statistics};

use crate::error::CheckpointError;

/// Exact position of a [`ChaCha8Rng`].
///
/// Restoring yields a generator that continues with the very next word
/// the captured one would have produced.
///
/// # Examples
///
/// ```
/// use rand::{Rng, SeedableRng};
/// use rand_chacha::ChaCha8Rng;
/// use sorb_checkpoint::RngState;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let _: u32 = rng.random();
/// let state = RngState::capture(&rng);
///
/// let mut resumed = state.restore();
/// assert_eq!(rng.random::<u64>(), resumed.random::<u64>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RngState {
    /// Key material the generator was created from.
    pub seed: [u8; 32],
    /// Stream selector.
    pub stream: u64,
    /// Offset, in 32-bit words, into the stream.
    pub word_pos: u128,
}

impl RngState {
    /// Record `rng`'s current position.
    pub fn capture(rng: &ChaCha8Rng) -> Self {
        Self {
            seed: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: rng.get_word_pos(),
        }
    }

    /// A generator positioned exactly where the captured one was.
    pub fn restore(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos(self.word_pos);
        rng
    }
}

/// The parameters a checkpoint must agree with before it is applied.
#[derive(Clone, Copy, Debug)]
pub struct RunIdentity<'a> {
    /// Lattice extents.
    pub extents: &'a [u32],
    /// Lattice boundary conditions.
    pub boundaries: &'a [Boundary],
    /// Deposition model.
    pub model: Model,
    /// Base RNG seed.
    pub seed: u64,
    /// Total repetitions in the run.
    pub repetitions: u32,
    /// Fingerprint of the full configuration.
    pub config_hash: u64,
}

/// Complete resumable state of a simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Fingerprint of the configuration that produced this state.
    pub config_hash: u64,
    /// Base RNG seed of the run.
    pub seed: u64,
    /// Deposition model of the run.
    pub model: Model,
    /// Total repetitions the run was configured for.
    pub repetitions: u32,
    /// Repetition in progress.
    pub repetition: RepetitionId,
    /// Lattice occupancy, extents and boundaries.
    pub lattice: Lattice,
    /// Statistics of the repetition in progress, including its attempt count.
    pub statistics: Statistics,
    /// Sums over repetitions already finished.
    pub aggregator: ResultsAggregator,
    /// RNG position inside the repetition in progress.
    pub rng: RngState,
}

impl Checkpoint {
    /// Attempts made so far in the repetition in progress.
    pub fn attempts(&self) -> u64 {
        self.statistics.attempts()
    }

    /// Check that this checkpoint belongs to the run described by `identity`.
    ///
    /// Named parameters are compared first so the error says what differs;
    /// the configuration hash catches everything else.
    pub fn verify(&self, identity: &RunIdentity<'_>) -> Result<(), CheckpointError> {
        if self.lattice.extents() != identity.extents {
            return Err(mismatch(
                "extents",
                format!("{:?}", identity.extents),
                format!("{:?}", self.lattice.extents()),
            ));
        }
        if self.lattice.boundaries() != identity.boundaries {
            return Err(mismatch(
                "periodicity",
                format!("{:?}", identity.boundaries),
                format!("{:?}", self.lattice.boundaries()),
            ));
        }
        if self.model != identity.model {
            return Err(mismatch(
                "model",
                identity.model.to_string(),
                self.model.to_string(),
            ));
        }
        if self.seed != identity.seed {
            return Err(mismatch(
                "seed",
                identity.seed.to_string(),
                self.seed.to_string(),
            ));
        }
        if self.repetitions != identity.repetitions {
            return Err(mismatch(
                "repetitions",
                identity.repetitions.to_string(),
                self.repetitions.to_string(),
            ));
        }
        if self.config_hash != identity.config_hash {
            return Err(CheckpointError::ConfigMismatch {
                recorded: self.config_hash,
                current: identity.config_hash,
            });
        }
        Ok(())
    }

    /// Structural consistency between the captured parts.
    pub(crate) fn check_consistency(&self) -> Result<(), CheckpointError> {
        let sites = self.lattice.site_count() as u64;
        if self.statistics.site_count() != sites {
            return Err(CheckpointError::Malformed {
                detail: format!(
                    "statistics cover {} sites, lattice has {sites}",
                    self.statistics.site_count()
                ),
            });
        }
        if let Some(agg_sites) = self.aggregator.site_count() {
            if agg_sites != sites {
                return Err(CheckpointError::Malformed {
                    detail: format!("aggregated sums cover {agg_sites} sites, lattice has {sites}"),
                });
            }
        }
        if self.repetition.0 >= self.repetitions {
            return Err(CheckpointError::Malformed {
                detail: format!(
                    "repetition {} out of range for {} repetitions",
                    self.repetition, self.repetitions
                ),
            });
        }
        if self.aggregator.simulations() != u64::from(self.repetition.0) {
            return Err(CheckpointError::Malformed {
                detail: format!(
                    "{} repetitions summed before repetition {}",
                    self.aggregator.simulations(),
                    self.repetition
                ),
            });
        }
        Ok(())
    }
}

fn mismatch(field: &'static str, expected: String, found: String) -> CheckpointError {
    CheckpointError::Mismatch {
        field,
        expected,
        found,
    }
}
