//! Error types for statistics aggregation.

use std::fmt;

use crate::metric::Metric;

/// Errors arising when statistics cannot be combined or restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Two series that must share timestamps disagree at `index`.
    ///
    /// `None` on either side means that series ended before `index`.
    InconsistentTimeSeries {
        /// Metric whose series disagree.
        metric: Metric,
        /// First position where the timestamps differ.
        index: usize,
        /// Timestamp held by the accumulated series.
        expected: Option<u64>,
        /// Timestamp held by the incoming series.
        found: Option<u64>,
    },
    /// The incoming statistics track a different set of metrics.
    MetricMismatch {
        /// Metrics already being accumulated.
        expected: Vec<Metric>,
        /// Metrics carried by the incoming statistics.
        found: Vec<Metric>,
    },
    /// The incoming statistics were recorded on a lattice of another size.
    SiteCountMismatch {
        /// Site count already being accumulated.
        expected: u64,
        /// Site count of the incoming statistics.
        found: u64,
    },
    /// Finalization was requested before any repetition was added.
    NoSimulations,
    /// Restored state violates a structural invariant.
    InvalidState {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentTimeSeries {
                metric,
                index,
                expected,
                found,
            } => {
                write!(f, "{metric} series diverge at point {index}: ")?;
                match (expected, found) {
                    (Some(e), Some(x)) => write!(f, "expected timestamp {e}, found {x}"),
                    (Some(e), None) => write!(f, "expected timestamp {e}, incoming series ended"),
                    (None, Some(x)) => write!(f, "found extra timestamp {x}"),
                    (None, None) => write!(f, "no timestamps"),
                }
            }
            Self::MetricMismatch { expected, found } => {
                write!(f, "metric sets differ: expected {expected:?}, found {found:?}")
            }
            Self::SiteCountMismatch { expected, found } => {
                write!(f, "site count {found} does not match accumulated {expected}")
            }
            Self::NoSimulations => write!(f, "no repetitions were added before finalizing"),
            Self::InvalidState { reason } => write!(f, "invalid statistics state: {reason}"),
        }
    }
}

impl std::error::Error for StatsError {}
