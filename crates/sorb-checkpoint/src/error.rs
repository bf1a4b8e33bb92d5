//! Error types for checkpoint encoding, storage and verification.

use std::fmt;
use std::io;

/// Errors that can occur while saving, loading or applying a checkpoint.
#[derive(Debug)]
pub enum CheckpointError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The data does not start with the expected `b"SORB"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the data.
        found: u8,
    },
    /// The data decoded but describes an impossible state.
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The checkpoint belongs to a run with different parameters.
    Mismatch {
        /// Which parameter differs.
        field: &'static str,
        /// Value required by the current configuration.
        expected: String,
        /// Value recorded in the checkpoint.
        found: String,
    },
    /// Every named parameter matches but the configuration hash does not.
    ConfigMismatch {
        /// Hash recorded in the checkpoint.
        recorded: u64,
        /// Hash computed from the current configuration.
        current: u64,
    },
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"SORB\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported checkpoint format version {found}")
            }
            Self::Malformed { detail } => write!(f, "malformed checkpoint: {detail}"),
            Self::Mismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "checkpoint {field} mismatch: configuration has {expected}, checkpoint has {found}"
            ),
            Self::ConfigMismatch { recorded, current } => write!(
                f,
                "config hash mismatch: recorded={recorded:#018x}, current={current:#018x}"
            ),
        }
    }
}

impl std::error::Error for CheckpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CheckpointError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
