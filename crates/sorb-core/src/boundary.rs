//! Per-axis boundary conditions.

use std::fmt;

/// How a lattice axis treats coordinates that fall off its ends.
///
/// # Examples
///
/// ```
/// use sorb_core::Boundary;
///
/// assert!(Boundary::Periodic.is_periodic());
/// assert!(!Boundary::Open.is_periodic());
/// assert_eq!(Boundary::from(true), Boundary::Periodic);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Coordinates wrap to the opposite end (ring / torus topology).
    Periodic,
    /// Coordinates past either end are out of range; edge cells have
    /// fewer neighbours.
    Open,
}

impl Boundary {
    /// Whether this axis wraps.
    pub fn is_periodic(self) -> bool {
        self == Self::Periodic
    }

    /// Wire tag used by checkpoint encoding and config hashing.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Periodic => 1,
        }
    }

    /// Inverse of [`as_u8`](Self::as_u8).
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Open),
            1 => Some(Self::Periodic),
            _ => None,
        }
    }
}

impl From<bool> for Boundary {
    fn from(periodic: bool) -> Self {
        if periodic {
            Self::Periodic
        } else {
            Self::Open
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Periodic => f.write_str("periodic"),
            Self::Open => f.write_str("open"),
        }
    }
}
