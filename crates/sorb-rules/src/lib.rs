//! Adsorption rules for Sorb simulations.
//!
//! A rule answers two questions for its deposition model: where to try
//! next ([`Rule::propose`]) and whether a given try may land
//! ([`Rule::validate`]). [`Rule::validate_and_apply`] combines the check
//! with the lattice's transactional
//! [`particle_adsorb`](sorb_lattice::Lattice::particle_adsorb).
//!
//! # Models
//!
//! - [`Monomer`]: one site, must be empty
//! - [`Dimer`]: two adjacent sites, both must be empty
//! - [`NnExclusion`]: one site, which and whose neighbours must be empty
//!
//! [`AdsorptionRule`] is the tagged union the driver stores, built from a
//! [`Model`](sorb_core::Model) via [`AdsorptionRule::new`].
//!
//! Rules hold no lattice state. Any number of rules may inspect the same
//! lattice; only `validate_and_apply` mutates it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attempt;
pub mod dimer;
pub mod error;
pub mod exclusion;
pub mod monomer;
pub mod rule;

pub use attempt::{Attempt, Direction};
pub use dimer::Dimer;
pub use error::RuleError;
pub use exclusion::NnExclusion;
pub use monomer::Monomer;
pub use rule::{AdsorptionRule, Footprint, Rule};
