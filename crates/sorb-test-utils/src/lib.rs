//! Test fixtures for Sorb development.
//!
//! Lattice builders with preplaced particles, scratch file paths, and a
//! [`RecordingStore`] that keeps every checkpoint it is handed.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::path::PathBuf;

use smallvec::smallvec;
use sorb_core::{Boundary, Site};
use sorb_lattice::Lattice;

pub use fixtures::RecordingStore;

/// A 1D lattice of `len` sites with `occupied` already filled.
///
/// Panics if the lattice is invalid or a site cannot be placed.
pub fn line_with(len: u32, boundary: Boundary, occupied: &[i64]) -> Lattice {
    let mut lattice = Lattice::line(len, boundary)
        .unwrap_or_else(|e| panic!("invalid line of {len}: {e}"));
    for &x in occupied {
        let site: Site = smallvec![x];
        assert!(lattice.particle_adsorb(&[site]), "cannot occupy {x}");
    }
    lattice
}

/// A 2D lattice with `occupied` `(row, col)` sites already filled.
pub fn grid_with(
    rows: u32,
    cols: u32,
    row_boundary: Boundary,
    col_boundary: Boundary,
    occupied: &[(i64, i64)],
) -> Lattice {
    let mut lattice = Lattice::grid(rows, cols, row_boundary, col_boundary)
        .unwrap_or_else(|e| panic!("invalid {rows}x{cols} grid: {e}"));
    for &(r, c) in occupied {
        let site: Site = smallvec![r, c];
        assert!(lattice.particle_adsorb(&[site]), "cannot occupy ({r}, {c})");
    }
    lattice
}

/// A per-process path in the system temp directory.
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sorb-{}-{name}", std::process::id()))
}
