//! Benchmark profiles for the Sorb adsorption simulator.
//!
//! - [`reference_profile`]: 10K-site ring, one unit of time
//! - [`grid_profile`]: 100x100 periodic grid, one unit of time
//! - [`scattered_line`]: deterministic partially-filled line for lattice
//!   micro-benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use smallvec::smallvec;
use sorb_core::{Boundary, Model};
use sorb_engine::{SimConfig, StopCondition};
use sorb_lattice::{Lattice, LatticeError};

/// A 10K-site periodic line running `model` for one unit of time.
pub fn reference_profile(model: Model, seed: u64) -> SimConfig {
    let mut config = SimConfig::line(10_000, Boundary::Periodic, model);
    config.stop = StopCondition::Time(1.0);
    config.seed = seed;
    config
}

/// A 100x100 periodic grid running `model` for one unit of time.
pub fn grid_profile(model: Model, seed: u64) -> SimConfig {
    let mut config = SimConfig::grid(100, 100, Boundary::Periodic, Boundary::Periodic, model);
    config.stop = StopCondition::Time(1.0);
    config.seed = seed;
    config
}

/// A line of `len` sites with roughly every third site occupied.
///
/// Placement is a multiplicative hash of the index and `seed`, so the
/// same arguments always yield the same lattice.
pub fn scattered_line(len: u32, seed: u64) -> Result<Lattice, LatticeError> {
    let mut lattice = Lattice::line(len, Boundary::Periodic)?;
    for x in 0..i64::from(len) {
        let h = (x as u64)
            .wrapping_add(seed)
            .wrapping_mul(6364136223846793005)
            >> 33;
        if h % 3 == 0 {
            lattice.particle_adsorb(&[smallvec![x]]);
        }
    }
    Ok(lattice)
}
