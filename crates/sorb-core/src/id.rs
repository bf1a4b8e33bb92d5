//! Strongly-typed identifiers and the [`Site`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Zero-based index of one independent repetition within a run.
///
/// Each repetition starts from an empty lattice and owns its own RNG
/// stream, so `RepetitionId(n)` fully determines the random sequence
/// given the run seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepetitionId(pub u32);

impl RepetitionId {
    /// The repetition after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RepetitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RepetitionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Lattice coordinate: one signed component per axis.
///
/// 1D sites are `[i]`, 2D sites are `[row, col]`. Components are `i64`
/// so periodic wraparound can be applied to arbitrarily far offsets
/// before normalization. Inline storage for two axes avoids heap
/// allocation on the hot path.
pub type Site = SmallVec<[i64; 2]>;
