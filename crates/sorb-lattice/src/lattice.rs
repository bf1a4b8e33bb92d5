//! The occupancy lattice and its periodic addressing.

use std::fmt;

use smallvec::{smallvec, SmallVec};
use sorb_core::{Boundary, CellState, Site};

use crate::error::LatticeError;

/// A 1D or 2D lattice of [`CellState`]s.
///
/// Cells are stored row-major: for a 2D lattice with extents
/// `[rows, cols]`, site `[r, c]` lives at index `r * cols + c`.
///
/// # Examples
///
/// ```
/// use smallvec::smallvec;
/// use sorb_core::{Boundary, Site};
/// use sorb_lattice::Lattice;
///
/// let mut lattice = Lattice::line(10, Boundary::Periodic).unwrap();
///
/// // Periodic axes wrap arbitrary offsets.
/// let far: Site = smallvec![-1];
/// assert_eq!(lattice.normalize_site(&far).as_slice(), &[9]);
///
/// // Adsorption is all-or-nothing.
/// assert!(lattice.particle_adsorb(&[smallvec![9], smallvec![10]]));
/// assert!(!lattice.particle_adsorb(&[smallvec![1], smallvec![0]]));
/// assert_eq!(lattice.coverage(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    extents: SmallVec<[u32; 2]>,
    boundaries: SmallVec<[Boundary; 2]>,
    cells: Vec<CellState>,
    occupied: usize,
}

impl Lattice {
    /// Maximum extent per axis: coordinate arithmetic must fit in `i32`.
    pub const MAX_EXTENT: u32 = i32::MAX as u32;

    /// Create an empty lattice with one extent and one boundary per axis.
    ///
    /// # Errors
    ///
    /// Fails when the axis count is not 1 or 2, the boundary count differs
    /// from the axis count, an extent is zero or above [`Self::MAX_EXTENT`],
    /// or the site count overflows `usize`.
    pub fn new(extents: &[u32], boundaries: &[Boundary]) -> Result<Self, LatticeError> {
        let site_count = Self::site_count_for(extents, boundaries)?;
        Ok(Self {
            extents: extents.iter().copied().collect(),
            boundaries: boundaries.iter().copied().collect(),
            cells: vec![CellState::Empty; site_count],
            occupied: 0,
        })
    }

    /// Create an empty 1D lattice of `len` sites.
    pub fn line(len: u32, boundary: Boundary) -> Result<Self, LatticeError> {
        Self::new(&[len], &[boundary])
    }

    /// Create an empty 2D lattice of `rows × cols` sites.
    pub fn grid(
        rows: u32,
        cols: u32,
        row_boundary: Boundary,
        col_boundary: Boundary,
    ) -> Result<Self, LatticeError> {
        Self::new(&[rows, cols], &[row_boundary, col_boundary])
    }

    /// Rebuild a lattice from previously captured cells.
    ///
    /// The occupied count is recomputed from `cells`.
    pub fn from_cells(
        extents: &[u32],
        boundaries: &[Boundary],
        cells: Vec<CellState>,
    ) -> Result<Self, LatticeError> {
        let expected = Self::site_count_for(extents, boundaries)?;
        if cells.len() != expected {
            return Err(LatticeError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        let occupied = cells.iter().filter(|c| c.is_occupied()).count();
        Ok(Self {
            extents: extents.iter().copied().collect(),
            boundaries: boundaries.iter().copied().collect(),
            cells,
            occupied,
        })
    }

    /// Site count of a lattice with this shape, without allocating it.
    ///
    /// # Errors
    ///
    /// The same shape errors as [`new`](Self::new).
    pub fn site_count_for(extents: &[u32], boundaries: &[Boundary]) -> Result<usize, LatticeError> {
        if extents.is_empty() || extents.len() > 2 {
            return Err(LatticeError::UnsupportedDimension {
                ndim: extents.len(),
            });
        }
        if boundaries.len() != extents.len() {
            return Err(LatticeError::BoundaryCountMismatch {
                extents: extents.len(),
                boundaries: boundaries.len(),
            });
        }
        let mut total: usize = 1;
        for (axis, &extent) in extents.iter().enumerate() {
            if extent == 0 {
                return Err(LatticeError::EmptyAxis { axis });
            }
            if extent > Self::MAX_EXTENT {
                return Err(LatticeError::ExtentTooLarge {
                    axis,
                    value: extent,
                    max: Self::MAX_EXTENT,
                });
            }
            total = total
                .checked_mul(extent as usize)
                .ok_or(LatticeError::TooManySites)?;
        }
        Ok(total)
    }

    /// Number of axes (1 or 2).
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Per-axis site counts.
    pub fn extents(&self) -> &[u32] {
        &self.extents
    }

    /// Per-axis boundary conditions.
    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Whether `axis` wraps. Out-of-range axes report `false`.
    pub fn is_periodic(&self, axis: usize) -> bool {
        self.boundaries.get(axis).is_some_and(|b| b.is_periodic())
    }

    /// Total number of sites.
    pub fn site_count(&self) -> usize {
        self.cells.len()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn coverage(&self) -> usize {
        self.occupied
    }

    /// Map a site to canonical form.
    ///
    /// Periodic axes are reduced into `[0, extent)` with a floored modulo,
    /// so `k`, `k + extent` and `k - extent` all normalize identically.
    /// Open axes are left unchanged; [`index_of`](Self::index_of) performs
    /// the bounds check.
    pub fn normalize_site(&self, site: &Site) -> Site {
        site.iter()
            .enumerate()
            .map(|(axis, &v)| match self.boundaries.get(axis) {
                Some(Boundary::Periodic) => v.rem_euclid(i64::from(self.extents[axis])),
                _ => v,
            })
            .collect()
    }

    /// Row-major index of `site` after normalization.
    ///
    /// Returns `None` if the site has the wrong number of components or
    /// lies outside an open axis.
    pub fn index_of(&self, site: &Site) -> Option<usize> {
        if site.len() != self.ndim() {
            return None;
        }
        let mut index = 0usize;
        for (axis, &raw) in site.iter().enumerate() {
            let extent = i64::from(self.extents[axis]);
            let v = if self.boundaries[axis].is_periodic() {
                raw.rem_euclid(extent)
            } else {
                raw
            };
            if v < 0 || v >= extent {
                return None;
            }
            index = index * extent as usize + v as usize;
        }
        Some(index)
    }

    /// Canonical site for a row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.site_count()`.
    pub fn site_of(&self, index: usize) -> Site {
        assert!(
            index < self.site_count(),
            "index {index} out of range for {} sites",
            self.site_count()
        );
        match self.extents.as_slice() {
            [_] => smallvec![index as i64],
            [_, cols] => {
                let cols = *cols as usize;
                smallvec![(index / cols) as i64, (index % cols) as i64]
            }
            _ => unreachable!("construction restricts lattices to 1 or 2 axes"),
        }
    }

    /// State of the cell at `site`, or `None` if out of range.
    pub fn state(&self, site: &Site) -> Option<CellState> {
        self.index_of(site).map(|i| self.cells[i])
    }

    /// Whether `site` is in range and empty.
    pub fn is_empty_at(&self, site: &Site) -> bool {
        self.state(site).is_some_and(CellState::is_empty)
    }

    /// Von Neumann neighbours of `site`, in canonical form.
    ///
    /// Order is axis by axis, lower neighbour first. Periodic axes always
    /// contribute two neighbours (which coincide with each other or with
    /// `site` itself on very short axes); open axes omit neighbours past
    /// either end.
    pub fn neighbours(&self, site: &Site) -> SmallVec<[Site; 4]> {
        let base = self.normalize_site(site);
        let mut result = SmallVec::new();
        for axis in 0..self.ndim().min(base.len()) {
            let extent = i64::from(self.extents[axis]);
            for delta in [-1i64, 1] {
                let mut next = base.clone();
                let v = base[axis] + delta;
                if self.boundaries[axis].is_periodic() {
                    next[axis] = v.rem_euclid(extent);
                } else if (0..extent).contains(&v) {
                    next[axis] = v;
                } else {
                    continue;
                }
                result.push(next);
            }
        }
        result
    }

    /// Occupy every site in `sites`, or none of them.
    ///
    /// Succeeds only if every site is in range, currently empty, and
    /// distinct (after normalization) from the others in the same call.
    /// An empty slice is rejected. Returns whether the lattice changed.
    pub fn particle_adsorb(&mut self, sites: &[Site]) -> bool {
        if sites.is_empty() {
            return false;
        }
        let mut indices: SmallVec<[usize; 2]> = SmallVec::with_capacity(sites.len());
        for site in sites {
            let Some(index) = self.index_of(site) else {
                return false;
            };
            if self.cells[index].is_occupied() || indices.contains(&index) {
                return false;
            }
            indices.push(index);
        }
        for &index in &indices {
            self.cells[index] = CellState::Occupied;
        }
        self.occupied += indices.len();
        true
    }

    /// Return every cell to empty.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
        self.occupied = 0;
    }
}

impl fmt::Display for Lattice {
    /// One line per row, cells rendered as `0` (empty) or `1` (occupied).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.extents.last().copied().unwrap_or(1) as usize;
        for (r, row) in self.cells.chunks(width).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
