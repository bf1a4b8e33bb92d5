//! Plain random sequential adsorption of single particles.

use rand::RngCore;
use smallvec::smallvec;
use sorb_core::Model;
use sorb_lattice::Lattice;

use crate::attempt::Attempt;
use crate::rule::{uniform_site, Footprint, Rule};

/// Single-site particles. A site accepts a particle iff it is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Monomer;

impl Rule for Monomer {
    fn model(&self) -> Model {
        Model::Monomer
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
    }
}
