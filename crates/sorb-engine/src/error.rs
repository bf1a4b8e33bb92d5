//! Errors surfaced while running or resuming a simulation.

use std::error::Error;
use std::fmt;

use sorb_checkpoint::CheckpointError;
use sorb_stats::StatsError;

use crate::config::ConfigError;
use crate::driver::DriverState;

/// Errors from [`Simulation`](crate::Simulation) operations.
#[derive(Debug)]
pub enum RunError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Statistics could not be aggregated or processed.
    Stats(StatsError),
    /// A checkpoint could not be saved, loaded, or applied.
    Checkpoint(CheckpointError),
    /// [`finish()`](crate::Simulation::finish) was called before every
    /// repetition completed.
    NotFinished {
        /// Where the driver stopped.
        state: DriverState,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Stats(e) => write!(f, "statistics: {e}"),
            Self::Checkpoint(e) => write!(f, "checkpoint: {e}"),
            Self::NotFinished { state } => {
                write!(f, "run not finished, driver is {state}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Stats(e) => Some(e),
            Self::Checkpoint(e) => Some(e),
            Self::NotFinished { .. } => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StatsError> for RunError {
    fn from(e: StatsError) -> Self {
        Self::Stats(e)
    }
}

impl From<CheckpointError> for RunError {
    fn from(e: CheckpointError) -> Self {
        Self::Checkpoint(e)
    }
}
