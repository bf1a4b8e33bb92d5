//! Random sequential adsorption with nearest-neighbour exclusion.

use rand::RngCore;
use smallvec::smallvec;
use sorb_core::Model;
use sorb_lattice::Lattice;

use crate::attempt::Attempt;
use crate::rule::{uniform_site, Footprint, Rule};

/// Single-site particles that block their von Neumann neighbours.
///
/// A site accepts a particle iff it and every in-range neighbour are
/// empty. Neighbours past the end of an open axis do not exist and so
/// never block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NnExclusion;

impl Rule for NnExclusion {
    fn model(&self) -> Model {
        Model::NearestNeighborExclusion
    }

    fn propose(&self, lattice: &Lattice, rng: &mut dyn RngCore) -> Attempt {
        Attempt::at(uniform_site(lattice, rng))
    }

    fn footprint(&self, lattice: &Lattice, attempt: &Attempt) -> Option<Footprint> {
        lattice.index_of(&attempt.site)?;
        Some(smallvec![lattice.normalize_site(&attempt.site)])
    }

    fn validate(&self, lattice: &Lattice, attempt: &Attempt) -> bool {
        lattice.is_empty_at(&attempt.site)
            && lattice
                .neighbours(&attempt.site)
                .iter()
                .all(|n| lattice.is_empty_at(n))
    }
}
