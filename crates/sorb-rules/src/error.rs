//! Error types for rule construction.

use std::fmt;

/// Errors arising when a rule cannot operate on a lattice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// No axis is long enough to hold two adjacent sites.
    DimerDoesNotFit {
        /// Extents of the lattice that was rejected.
        extents: Vec<u32>,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimerDoesNotFit { extents } => write!(
                f,
                "dimers need an axis with at least 2 sites, lattice extents are {extents:?}"
            ),
        }
    }
}

impl std::error::Error for RuleError {}
