//! Checkpointing for Sorb simulations.
//!
//! A [`Checkpoint`] captures everything needed to continue a run exactly
//! where it stopped: lattice cells, the current repetition's statistics,
//! the sums of finished repetitions, and the RNG position. Resuming from a
//! checkpoint produces bit-identical results to an uninterrupted run.
//!
//! # Architecture
//!
//! - [`CheckpointStore`] is the save/load boundary the driver talks to
//! - [`FileStore`] persists to disk, [`MemoryStore`] keeps encoded bytes,
//!   [`NullStore`] discards everything
//! - [`codec`] is a custom little-endian binary format (no serde)
//! - [`config_hash`] fingerprints run configuration to catch mismatched
//!   resumes
//!
//! # Format
//!
//! ```text
//! [MAGIC "SORB"] [VERSION u8] [Identity] [Lattice] [Statistics]
//! [Aggregator] [RngState]
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hash;
pub mod store;
pub mod types;

pub use codec::{decode_checkpoint, encode_checkpoint};
pub use error::CheckpointError;
pub use hash::config_hash;
pub use store::{CheckpointStore, FileStore, MemoryStore, NullStore};
pub use types::{Checkpoint, RngState, RunIdentity};

/// Magic bytes at the start of every checkpoint.
pub const MAGIC: [u8; 4] = *b"SORB";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
