//! Proposed adsorption events.

use sorb_core::Site;

/// A unit step along one lattice axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Axis index (0 for rows / the only axis, 1 for columns).
    pub axis: usize,
    /// `true` steps towards higher coordinates.
    pub forward: bool,
}

impl Direction {
    /// Step `+1` along `axis`.
    pub const fn forward(axis: usize) -> Self {
        Self {
            axis,
            forward: true,
        }
    }

    /// Step `-1` along `axis`.
    pub const fn backward(axis: usize) -> Self {
        Self {
            axis,
            forward: false,
        }
    }

    /// Signed offset of this step.
    pub fn offset(self) -> i64 {
        if self.forward {
            1
        } else {
            -1
        }
    }

    /// `site` moved one step in this direction, without normalization.
    ///
    /// Components beyond the site's dimensionality are left alone.
    pub fn step(self, site: &Site) -> Site {
        let mut next = site.clone();
        if let Some(v) = next.get_mut(self.axis) {
            *v += self.offset();
        }
        next
    }
}

/// One proposed adsorption: a primary site and, for dimers, the direction
/// of the partner site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    /// Primary target site. May be un-normalized.
    pub site: Site,
    /// Partner direction for two-site particles.
    pub direction: Option<Direction>,
}

impl Attempt {
    /// A single-site attempt.
    pub fn at(site: Site) -> Self {
        Self {
            site,
            direction: None,
        }
    }

    /// A two-site attempt whose partner lies one step along `direction`.
    pub fn toward(site: Site, direction: Direction) -> Self {
        Self {
            site,
            direction: Some(direction),
        }
    }
}
