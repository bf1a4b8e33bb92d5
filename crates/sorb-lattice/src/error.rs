//! Error types for lattice construction.

use std::fmt;

/// Errors arising from lattice construction or restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// Only 1D and 2D lattices are supported.
    UnsupportedDimension {
        /// Number of extents supplied.
        ndim: usize,
    },
    /// An axis has zero sites.
    EmptyAxis {
        /// Index of the offending axis.
        axis: usize,
    },
    /// An axis extent exceeds what coordinates can address.
    ExtentTooLarge {
        /// Index of the offending axis.
        axis: usize,
        /// The value provided.
        value: u32,
        /// The maximum allowed value.
        max: u32,
    },
    /// The number of boundary conditions does not match the number of axes.
    BoundaryCountMismatch {
        /// Number of extents.
        extents: usize,
        /// Number of boundary conditions.
        boundaries: usize,
    },
    /// The total site count does not fit in memory addressing.
    TooManySites,
    /// Restored cell data does not match the declared shape.
    CellCountMismatch {
        /// Site count implied by the extents.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDimension { ndim } => {
                write!(f, "lattice must have 1 or 2 axes, got {ndim}")
            }
            Self::EmptyAxis { axis } => write!(f, "axis {axis} must have at least one site"),
            Self::ExtentTooLarge { axis, value, max } => {
                write!(f, "axis {axis} extent {value} exceeds maximum {max}")
            }
            Self::BoundaryCountMismatch {
                extents,
                boundaries,
            } => write!(
                f,
                "{boundaries} boundary conditions given for {extents} axes"
            ),
            Self::TooManySites => write!(f, "total site count overflows usize"),
            Self::CellCountMismatch { expected, found } => {
                write!(f, "expected {expected} cells, got {found}")
            }
        }
    }
}

impl std::error::Error for LatticeError {}
