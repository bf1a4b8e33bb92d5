//! Occupancy state of a single lattice cell.

use std::fmt;

/// State of one lattice cell.
///
/// Cells start [`Empty`](CellState::Empty) and only ever move to
/// [`Occupied`](CellState::Occupied); adsorption is irreversible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    /// No particle on this cell.
    #[default]
    Empty = 0,
    /// A particle (or one half of a dimer) sits on this cell.
    Occupied = 1,
}

impl CellState {
    /// Whether the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Whether the cell is occupied.
    pub fn is_occupied(self) -> bool {
        self == Self::Occupied
    }

    /// Wire tag used by checkpoint encoding.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`as_u8`](Self::as_u8). Returns `None` for unknown tags.
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Empty),
            1 => Some(Self::Occupied),
            _ => None,
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("0"),
            Self::Occupied => f.write_str("1"),
        }
    }
}
