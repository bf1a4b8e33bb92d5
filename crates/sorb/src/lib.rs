//! Sorb: random sequential adsorption on 1D and 2D lattices.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Sorb sub-crates. For most users, adding `sorb` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sorb::prelude::*;
//!
//! let mut config = SimConfig::line(500, Boundary::Periodic, Model::Dimer);
//! config.stop = StopCondition::Time(10.0);
//! config.repetitions = 5;
//! config.seed = 42;
//!
//! let report = Simulation::new(config).unwrap().run_to_end().unwrap();
//! let coverage = report.final_value(Metric::Coverage).unwrap();
//! // Dimers on a ring jam near 1 - e^-2.
//! assert!(coverage > 0.8 && coverage < 0.9);
//! println!("{report}");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sorb-core` | Cell states, boundaries, models, identifiers |
//! | [`lattice`] | `sorb-lattice` | Occupancy grid, neighbours, empty runs |
//! | [`rules`] | `sorb-rules` | Monomer, dimer and exclusion adsorption rules |
//! | [`stats`] | `sorb-stats` | Per-repetition series, aggregation, reports |
//! | [`checkpoint`] | `sorb-checkpoint` | Resumable state, binary codec, stores |
//! | [`engine`] | `sorb-engine` | Run configuration and the simulation driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and identifiers (`sorb-core`).
pub use sorb_core as types;

/// The lattice occupancy grid (`sorb-lattice`).
///
/// [`lattice::Lattice`] handles periodic wrapping, neighbour lookup,
/// transactional adsorption, and empty-run counting.
pub use sorb_lattice as lattice;

/// Adsorption rules (`sorb-rules`).
///
/// The [`rules::Rule`] trait and [`rules::AdsorptionRule`], the union the
/// driver stores.
pub use sorb_rules as rules;

/// Statistics and reports (`sorb-stats`).
pub use sorb_stats as stats;

/// Checkpoint capture and storage (`sorb-checkpoint`).
///
/// Save with any [`checkpoint::CheckpointStore`]; resume with
/// [`engine::Simulation::resume`].
pub use sorb_checkpoint as checkpoint;

/// Run configuration and the simulation driver (`sorb-engine`).
pub use sorb_engine as engine;

/// Common imports for typical Sorb usage.
///
/// ```rust
/// use sorb::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sorb_core::{Boundary, CellState, Model, RepetitionId, Site};

    // Lattice and rules
    pub use sorb_lattice::Lattice;
    pub use sorb_rules::{AdsorptionRule, Rule};

    // Statistics
    pub use sorb_stats::{Metric, Report, ResultsAggregator, Statistics};

    // Checkpoints
    pub use sorb_checkpoint::{Checkpoint, CheckpointStore, FileStore, MemoryStore, NullStore};

    // Engine
    pub use sorb_engine::{
        ConfigError, DriverState, RunError, SimConfig, Simulation, StopCondition,
    };
}
