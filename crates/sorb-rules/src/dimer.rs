//! Random sequential adsorption of dimers (two-site particles).

use rand::{Rng, RngCore};
use smallvec::{smallvec, SmallVec};
use sorb_core::Model;
use sorb_lattice::Lattice;

use crate::attempt::{Attempt, Direction};
use crate::error::RuleError;
use crate::rule::{Footprint, Rule};

/// Two-site particles covering a site and one neighbour.
///
/// On a 1D lattice the partner is always the next site (`site + 1`,
/// wrapped when periodic). On a 2D lattice each proposal picks one of the
/// feasible directions (forward or backward along any axis with at least
/// two sites), then draws the primary site so the partner stays in range
/// on open axes.
///
/// An [`Attempt`] without a direction uses the first feasible direction,
/// which on 1D lattices is the forward step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dimer {
    directions: SmallVec<[Direction; 4]>,
}

impl Dimer {
    /// Prepare dimer placement on `lattice`.
    ///
    /// # Errors
    ///
    /// [`RuleError::DimerDoesNotFit`] if no axis has two or more sites.
    pub fn new(lattice: &Lattice) -> Result<Self, RuleError> {
        let directions: SmallVec<[Direction; 4]> = if lattice.ndim() == 1 {
            if lattice.extents()[0] >= 2 {
                smallvec![Direction::forward(0)]
            } else {
                SmallVec::new()
            }
        } else {
            lattice
                .extents()
                .iter()
                .enumerate()
                .filter(|(_, &n)| n >= 2)
                .flat_map(|(axis, _)| [Direction::forward(axis), Direction::backward(axis)])
                .collect()
        };
        if directions.is_empty() {
            return Err(RuleError::DimerDoesNotFit {
                extents: lattice.extents().to_vec(),
            });
        }
        Ok(Self { directions })
    }

    /// Directions proposals are drawn from.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn direction_of(&self, attempt: &Attempt) -> Direction {
        attempt.direction.unwrap_or(self.directions[0])
    }
}

impl Rule for Dimer {
    fn model(&self) -> Model {
        Model::Dimer
    }

    fn propose(&self, lattice: &Lattice, rng: &mut dyn RngCore) -> Attempt {
        let direction = if self.directions.len() == 1 {
            self.directions[0]
        } else {
            self.directions[rng.random_range(0..self.directions.len())]
        };
        let site = lattice
            .extents()
            .iter()
            .enumerate()
            .map(|(axis, &n)| {
                let n = i64::from(n);
                if axis != direction.axis || lattice.is_periodic(axis) {
                    rng.random_range(0..n)
                } else if direction.forward {
                    rng.random_range(0..n - 1)
                } else {
                    rng.random_range(1..n)
                }
            })
            .collect();
        Attempt::toward(site, direction)
    }

    fn footprint(&self, lattice: &Lattice, attempt: &Attempt) -> Option<Footprint> {
        let partner = self.direction_of(attempt).step(&attempt.site);
        lattice.index_of(&attempt.site)?;
        lattice.index_of(&partner)?;
        Some(smallvec![
            lattice.normalize_site(&attempt.site),
            lattice.normalize_site(&partner),
        ])
    }

    fn validate(&self, lattice: &Lattice, attempt: &Attempt) -> bool {
        match self.footprint(lattice, attempt) {
            Some(sites) => sites[0] != sites[1] && sites.iter().all(|s| lattice.is_empty_at(s)),
            None => false,
        }
    }
}
