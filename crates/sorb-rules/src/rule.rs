//! The [`Rule`] trait and the [`AdsorptionRule`] tagged union.

use rand::{Rng, RngCore};
use smallvec::SmallVec;
use sorb_core::{Model, Site};
use sorb_lattice::Lattice;

use crate::attempt::Attempt;
use crate::dimer::Dimer;
use crate::error::RuleError;
use crate::exclusion::NnExclusion;
use crate::monomer::Monomer;

/// Canonical sites an attempt would occupy.
pub type Footprint = SmallVec<[Site; 2]>;

/// Per-model adsorption logic.
///
/// # Contract
///
/// - `propose` only returns attempts whose footprint is in range.
/// - `validate` is a pure predicate on the current lattice.
/// - `validate_and_apply` mutates the lattice only when `validate` holds,
///   and then occupies exactly the footprint.
///
/// # Object safety
///
/// This trait is object-safe; randomness is passed as `&mut dyn RngCore`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use sorb_core::Boundary;
/// use sorb_lattice::Lattice;
/// use sorb_rules::{Monomer, Rule};
///
/// let mut lattice = Lattice::line(8, Boundary::Periodic).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
///
/// let attempt = Monomer.propose(&lattice, &mut rng);
/// assert!(Monomer.validate_and_apply(&mut lattice, &attempt));
/// assert!(!Monomer.validate_and_apply(&mut lattice, &attempt));
/// assert_eq!(lattice.coverage(), 1);
/// ```
pub trait Rule {
    /// The deposition model this rule implements.
    fn model(&self) -> Model;

    /// Draw the next attempt.
    fn propose(&self, lattice: &Lattice, rng: &mut dyn RngCore) -> Attempt;

    /// Sites `attempt` would occupy, or `None` if any lies out of range.
    fn footprint(&self, lattice: &Lattice, attempt: &Attempt) -> Option<Footprint>;

    /// Whether `attempt` may adsorb on the current lattice.
    fn validate(&self, lattice: &Lattice, attempt: &Attempt) -> bool;

    /// Validate `attempt` and, if it passes, occupy its footprint.
    ///
    /// Returns whether the lattice changed.
    fn validate_and_apply(&self, lattice: &mut Lattice, attempt: &Attempt) -> bool {
        if !self.validate(lattice, attempt) {
            return false;
        }
        self.footprint(lattice, attempt)
            .is_some_and(|sites| lattice.particle_adsorb(&sites))
    }
}

/// Draw each coordinate uniformly over its axis.
pub(crate) fn uniform_site(lattice: &Lattice, rng: &mut dyn RngCore) -> Site {
    lattice
        .extents()
        .iter()
        .map(|&n| rng.random_range(0..i64::from(n)))
        .collect()
}

/// Every supported rule behind one type.
///
/// The driver stores this rather than a trait object so the model is
/// visible to checkpointing and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdsorptionRule {
    /// See [`Monomer`].
    Monomer(Monomer),
    /// See [`Dimer`].
    Dimer(Dimer),
    /// See [`NnExclusion`].
    NnExclusion(NnExclusion),
}

impl AdsorptionRule {
    /// Build the rule for `model` on `lattice`.
    ///
    /// # Errors
    ///
    /// [`RuleError::DimerDoesNotFit`] when `model` is
    /// [`Model::Dimer`] and no axis has at least two sites.
    pub fn new(model: Model, lattice: &Lattice) -> Result<Self, RuleError> {
        Ok(match model {
            Model::Monomer => Self::Monomer(Monomer),
            Model::Dimer => Self::Dimer(Dimer::new(lattice)?),
            Model::NearestNeighborExclusion => Self::NnExclusion(NnExclusion),
        })
    }

    fn as_rule(&self) -> &dyn Rule {
        match self {
            Self::Monomer(r) => r,
            Self::Dimer(r) => r,
            Self::NnExclusion(r) => r,
        }
    }
}

impl Rule for AdsorptionRule {
    fn model(&self) -> Model {
        self.as_rule().model()
    }

    fn propose(&self, lattice: &Lattice, rng: &mut dyn RngCore) -> Attempt {
        self.as_rule().propose(lattice, rng)
    }

    fn footprint(&self, lattice: &Lattice, attempt: &Attempt) -> Option<Footprint> {
        self.as_rule().footprint(lattice, attempt)
    }

    fn validate(&self, lattice: &Lattice, attempt: &Attempt) -> bool {
        self.as_rule().validate(lattice, attempt)
    }

    fn validate_and_apply(&self, lattice: &mut Lattice, attempt: &Attempt) -> bool {
        self.as_rule().validate_and_apply(lattice, attempt)
    }
}
