//! Runs of consecutive empty sites.
//!
//! Runs are counted along the last axis: the whole line for 1D lattices,
//! each row independently for 2D grids. A start position contributes one
//! run of length `k` when it and the `k - 1` sites after it are all empty.
//! On a periodic last axis the window wraps back to the start of the row;
//! on an open last axis windows that would run past the end are not
//! counted.

use sorb_core::CellState;

use crate::lattice::Lattice;

impl Lattice {
    /// Number of start positions whose `k`-site window is entirely empty.
    ///
    /// Returns 0 when `k == 0`. For periodic rows shorter than `k` the
    /// window revisits sites, so a fully empty ring of `n` sites still
    /// reports `n` runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallvec::smallvec;
    /// use sorb_core::Boundary;
    /// use sorb_lattice::Lattice;
    ///
    /// let mut line = Lattice::line(5, Boundary::Open).unwrap();
    /// assert!(line.particle_adsorb(&[smallvec![2]]));
    /// assert_eq!(line.empty_runs(1), 4);
    /// assert_eq!(line.empty_runs(2), 2);
    /// assert_eq!(line.empty_runs(3), 0);
    /// ```
    pub fn empty_runs(&self, k: usize) -> usize {
        if k == 0 {
            return 0;
        }
        let width = self.extents().last().copied().unwrap_or(1) as usize;
        let periodic = self.is_periodic(self.ndim() - 1);
        self.cells()
            .chunks_exact(width)
            .map(|row| row_runs(row, k, periodic))
            .sum()
    }
}

fn row_runs(row: &[CellState], k: usize, periodic: bool) -> usize {
    let n = row.len();
    let starts = if periodic { n } else { (n + 1).saturating_sub(k) };
    (0..starts)
        .filter(|&start| (0..k).all(|offset| row[(start + offset) % n].is_empty()))
        .count()
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use sorb_core::{Boundary, Site};

    use crate::Lattice;

    fn line_with(len: u32, boundary: Boundary, occupied: &[i64]) -> Lattice {
        let mut lattice = Lattice::line(len, boundary).unwrap();
        for &i in occupied {
            let site: Site = smallvec![i];
            assert!(lattice.particle_adsorb(&[site]));
        }
        lattice
    }

    #[test]
    fn empty_open_line() {
        let lattice = line_with(5, Boundary::Open, &[]);
        assert_eq!(lattice.empty_runs(1), 5);
        assert_eq!(lattice.empty_runs(2), 4);
        assert_eq!(lattice.empty_runs(3), 3);
    }

    #[test]
    fn empty_periodic_line() {
        let lattice = line_with(5, Boundary::Periodic, &[]);
        assert_eq!(lattice.empty_runs(1), 5);
        assert_eq!(lattice.empty_runs(2), 5);
        assert_eq!(lattice.empty_runs(3), 5);
    }

    #[test]
    fn periodic_windows_wrap_past_the_end() {
        let lattice = line_with(5, Boundary::Periodic, &[2]);
        assert_eq!(lattice.empty_runs(1), 4);
        // starts 0, 3, 4
        assert_eq!(lattice.empty_runs(2), 3);
        // starts 3, 4
        assert_eq!(lattice.empty_runs(3), 2);
    }

    #[test]
    fn window_longer_than_open_line_counts_nothing() {
        let lattice = line_with(2, Boundary::Open, &[]);
        assert_eq!(lattice.empty_runs(3), 0);
    }

    #[test]
    fn window_longer_than_ring_revisits_sites() {
        let lattice = line_with(2, Boundary::Periodic, &[]);
        assert_eq!(lattice.empty_runs(3), 2);
        let blocked = line_with(2, Boundary::Periodic, &[0]);
        assert_eq!(blocked.empty_runs(3), 0);
    }

    #[test]
    fn zero_length_window() {
        let lattice = line_with(4, Boundary::Open, &[]);
        assert_eq!(lattice.empty_runs(0), 0);
    }

    #[test]
    fn grid_counts_each_row_separately() {
        let mut lattice =
            Lattice::grid(2, 3, Boundary::Periodic, Boundary::Open).unwrap();
        assert!(lattice.particle_adsorb(&[smallvec![0, 1]]));
        // Row 0 has no empty pair; row 1 has two.
        assert_eq!(lattice.empty_runs(2), 2);
        assert_eq!(lattice.empty_runs(1), 5);
    }

    #[test]
    fn full_lattice_has_no_runs() {
        let lattice = line_with(3, Boundary::Periodic, &[0, 1, 2]);
        for k in 1..=3 {
            assert_eq!(lattice.empty_runs(k), 0);
        }
    }
}
