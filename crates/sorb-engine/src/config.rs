//! Run configuration, validation, and error types.
//!
//! [`SimConfig`] is plain data. [`validate()`](SimConfig::validate)
//! checks every structural invariant up front so that a constructed
//! [`Simulation`](crate::Simulation) never fails for configuration
//! reasons mid-run.

use std::error::Error;
use std::fmt;

use sorb_checkpoint::{config_hash, RunIdentity};
use sorb_core::{Boundary, Model};
use sorb_lattice::{Lattice, LatticeError};
use sorb_rules::{AdsorptionRule, RuleError};

// ── StopCondition ──────────────────────────────────────────────────

/// When a repetition ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StopCondition {
    /// Run exactly this many attempts.
    Attempts(u64),
    /// Run while `attempts / site_count` is below this value.
    Time(f64),
}

impl StopCondition {
    /// Whether another attempt should be made after `attempts` so far.
    pub fn should_continue(&self, attempts: u64, site_count: u64) -> bool {
        match *self {
            Self::Attempts(max) => attempts < max,
            Self::Time(max) => (attempts as f64) / (site_count as f64) < max,
        }
    }

    /// Bytes folded into the configuration hash.
    pub(crate) fn descriptor(&self) -> [u8; 9] {
        let (tag, bits) = match *self {
            Self::Attempts(n) => (0u8, n),
            Self::Time(t) => (1u8, t.to_bits()),
        };
        let mut out = [0u8; 9];
        out[0] = tag;
        out[1..].copy_from_slice(&bits.to_le_bytes());
        out
    }
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attempts(n) => write!(f, "{n} attempts"),
            Self::Time(t) => write!(f, "time {t}"),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The lattice description is invalid.
    Lattice(LatticeError),
    /// The model cannot run on the described lattice.
    Rule(RuleError),
    /// `StopCondition::Attempts(0)`.
    ZeroAttempts,
    /// `StopCondition::Time` is NaN, infinite, zero, or negative.
    InvalidMaxTime {
        /// The invalid value.
        value: f64,
    },
    /// `repetitions` is zero.
    ZeroRepetitions,
    /// `checkpoint_interval` is `Some(0)`.
    ZeroCheckpointInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice(e) => write!(f, "lattice: {e}"),
            Self::Rule(e) => write!(f, "rule: {e}"),
            Self::ZeroAttempts => write!(f, "attempt budget must be at least 1"),
            Self::InvalidMaxTime { value } => {
                write!(f, "maximum time must be finite and positive, got {value}")
            }
            Self::ZeroRepetitions => write!(f, "repetitions must be at least 1"),
            Self::ZeroCheckpointInterval => {
                write!(f, "checkpoint_interval must be at least 1 when set")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            Self::Rule(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for ConfigError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<RuleError> for ConfigError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete description of a simulation run.
///
/// # Examples
///
/// ```
/// use sorb_core::{Boundary, Model};
/// use sorb_engine::{SimConfig, StopCondition};
///
/// let mut config = SimConfig::line(100, Boundary::Periodic, Model::Dimer);
/// config.stop = StopCondition::Time(2.0);
/// config.repetitions = 8;
/// config.seed = 1234;
/// assert!(config.validate().is_ok());
///
/// config.repetitions = 0;
/// assert!(config.validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Sites per axis: `[len]` or `[rows, cols]`.
    pub extents: Vec<u32>,
    /// Boundary condition per axis.
    pub boundaries: Vec<Boundary>,
    /// Deposition model.
    pub model: Model,
    /// When each repetition ends. Default: `Time(1.0)`.
    pub stop: StopCondition,
    /// Independent repetitions to average. Default: 1.
    pub repetitions: u32,
    /// Base RNG seed. Default: 0.
    pub seed: u64,
    /// Save a checkpoint every this many attempts. Default: `None`.
    pub checkpoint_interval: Option<u64>,
    /// Record empty-run series. `None` records them on 1D lattices only.
    pub track_empty_runs: Option<bool>,
}

impl SimConfig {
    /// A 1D run with default settings.
    pub fn line(len: u32, boundary: Boundary, model: Model) -> Self {
        Self::with_shape(vec![len], vec![boundary], model)
    }

    /// A 2D run with default settings.
    pub fn grid(
        rows: u32,
        cols: u32,
        row_boundary: Boundary,
        col_boundary: Boundary,
        model: Model,
    ) -> Self {
        Self::with_shape(vec![rows, cols], vec![row_boundary, col_boundary], model)
    }

    fn with_shape(extents: Vec<u32>, boundaries: Vec<Boundary>, model: Model) -> Self {
        Self {
            extents,
            boundaries,
            model,
            stop: StopCondition::Time(1.0),
            repetitions: 1,
            seed: 0,
            checkpoint_interval: None,
            track_empty_runs: None,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.stop {
            StopCondition::Attempts(0) => return Err(ConfigError::ZeroAttempts),
            StopCondition::Time(t) if !t.is_finite() || t <= 0.0 => {
                return Err(ConfigError::InvalidMaxTime { value: t });
            }
            _ => {}
        }
        if self.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        if self.checkpoint_interval == Some(0) {
            return Err(ConfigError::ZeroCheckpointInterval);
        }
        self.build().map(|_| ())
    }

    /// Whether empty-run series will be recorded.
    pub fn tracks_empty_runs(&self) -> bool {
        self.track_empty_runs.unwrap_or(self.extents.len() == 1)
    }

    /// Fingerprint of every setting a resumed run must share.
    ///
    /// `checkpoint_interval` is excluded: a run may be resumed with a
    /// different cadence.
    pub fn config_hash(&self) -> u64 {
        let mut descriptor = [0u8; 10];
        descriptor[..9].copy_from_slice(&self.stop.descriptor());
        descriptor[9] = u8::from(self.tracks_empty_runs());
        config_hash(
            self.seed,
            self.model,
            self.repetitions,
            &self.extents,
            &self.boundaries,
            &descriptor,
        )
    }

    /// Parameters a checkpoint must match to be resumed under this config.
    pub fn identity(&self) -> RunIdentity<'_> {
        RunIdentity {
            extents: &self.extents,
            boundaries: &self.boundaries,
            model: self.model,
            seed: self.seed,
            repetitions: self.repetitions,
            config_hash: self.config_hash(),
        }
    }

    pub(crate) fn build(&self) -> Result<(Lattice, AdsorptionRule), ConfigError> {
        let lattice = Lattice::new(&self.extents, &self.boundaries)?;
        let rule = AdsorptionRule::new(self.model, &lattice)?;
        Ok((lattice, rule))
    }
}
