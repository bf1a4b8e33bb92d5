//! Tracked quantities.

use std::fmt;

/// A quantity sampled into its own time series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Cumulative number of successful attempts.
    Successful,
    /// Number of occupied sites.
    Coverage,
    /// Number of empty sites.
    EmptySingle,
    /// Number of empty runs of length two.
    EmptyDouble,
    /// Number of empty runs of length three.
    EmptyTriple,
}

impl Metric {
    /// Metrics recorded for every model.
    pub const BASE: [Metric; 2] = [Metric::Successful, Metric::Coverage];

    /// Metrics recorded when empty runs are tracked.
    pub const EMPTY_RUNS: [Metric; 3] = [
        Metric::EmptySingle,
        Metric::EmptyDouble,
        Metric::EmptyTriple,
    ];

    /// Stable machine-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Successful => "successful",
            Self::Coverage => "coverage",
            Self::EmptySingle => "empty_single",
            Self::EmptyDouble => "empty_double",
            Self::EmptyTriple => "empty_triple",
        }
    }

    /// Heading used in rendered tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::Successful => "Successful Attempts / Attempts",
            Self::Coverage => "Coverage / Sites",
            Self::EmptySingle => "Empties - Single / Sites",
            Self::EmptyDouble => "Empties - Double / Sites",
            Self::EmptyTriple => "Empties - Triple / Sites",
        }
    }

    /// Window length for empty-run metrics.
    pub fn run_length(self) -> Option<usize> {
        match self {
            Self::EmptySingle => Some(1),
            Self::EmptyDouble => Some(2),
            Self::EmptyTriple => Some(3),
            Self::Successful | Self::Coverage => None,
        }
    }

    /// Wire tag used by checkpoint encoding.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`as_u8`](Self::as_u8).
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Successful),
            1 => Some(Self::Coverage),
            2 => Some(Self::EmptySingle),
            3 => Some(Self::EmptyDouble),
            4 => Some(Self::EmptyTriple),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
