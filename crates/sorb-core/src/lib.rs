//! Core types shared by the Sorb adsorption simulation crates.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary every other crate speaks: lattice [`Site`] coordinates,
//! per-cell [`CellState`], per-axis [`Boundary`] conditions, the
//! deposition [`Model`] selector, and the [`RepetitionId`] counter.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod cell;
pub mod id;
pub mod model;

pub use boundary::Boundary;
pub use cell::CellState;
pub use id::{RepetitionId, Site};
pub use model::{Model, ParseModelError};
