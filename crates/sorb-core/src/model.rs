//! Deposition model selector.

use std::error::Error;
use std::fmt;

/// Which adsorption rule a simulation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Model {
    /// Single particles; a site accepts a particle iff it is empty.
    Monomer,
    /// Particles covering two adjacent sites, placed atomically.
    Dimer,
    /// Single particles that also require every nearest neighbour to be
    /// empty.
    NearestNeighborExclusion,
}

impl Model {
    /// Every model, in wire-tag order.
    pub const ALL: [Model; 3] = [
        Model::Monomer,
        Model::Dimer,
        Model::NearestNeighborExclusion,
    ];

    /// Short lowercase name, accepted back by `TryFrom<&str>`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Monomer => "monomer",
            Self::Dimer => "dimer",
            Self::NearestNeighborExclusion => "nn-exclusion",
        }
    }

    /// Wire tag used by checkpoint encoding and config hashing.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Monomer => 0,
            Self::Dimer => 1,
            Self::NearestNeighborExclusion => 2,
        }
    }

    /// Inverse of [`as_u8`](Self::as_u8).
    pub fn from_u8(tag: u8) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a model name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseModelError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown model '{}', expected one of: monomer, dimer, nn-exclusion",
            self.input
        )
    }
}

impl Error for ParseModelError {}

impl TryFrom<&str> for Model {
    type Error = ParseModelError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "monomer" | "rsa" => Ok(Self::Monomer),
            "dimer" => Ok(Self::Dimer),
            "nn-exclusion" | "nn_exclusion" | "nnexclusion" | "exclusion" => {
                Ok(Self::NearestNeighborExclusion)
            }
            _ => Err(ParseModelError {
                input: s.to_string(),
            }),
        }
    }
}
