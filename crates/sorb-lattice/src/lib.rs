//! Occupancy lattices for Sorb simulations.
//!
//! [`Lattice`] stores one [`CellState`](sorb_core::CellState) per site of a
//! 1D line or a 2D row-major grid. Each axis carries its own
//! [`Boundary`](sorb_core::Boundary): periodic axes wrap coordinates with a
//! floored modulo, open axes reject anything outside `[0, extent)`.
//!
//! The only way to occupy cells is [`Lattice::particle_adsorb`], which is
//! all-or-nothing across the sites it is given. Cells never return to
//! empty except through [`Lattice::reset`].
//!
//! Gap statistics (runs of consecutive empty sites) live in [`runs`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod lattice;
pub mod runs;

pub use error::LatticeError;
pub use lattice::Lattice;
