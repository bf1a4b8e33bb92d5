//! Configuration fingerprinting.
//!
//! Uses FNV-1a for fast, deterministic hashing. These hashes are not
//! cryptographically secure; they only detect accidental mismatches.

use sorb_core::{Boundary, Model};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Compute a hash over the parameters that define a run.
///
/// `stop_descriptor` carries any further configuration bytes (the stop
/// condition, for instance) that a resume must also agree on.
pub fn config_hash(
    seed: u64,
    model: Model,
    repetitions: u32,
    extents: &[u32],
    boundaries: &[Boundary],
    stop_descriptor: &[u8],
) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_bytes(hash, &seed.to_le_bytes());
    hash = fnv1a_byte(hash, model.as_u8());
    hash = fnv1a_bytes(hash, &repetitions.to_le_bytes());
    hash = fnv1a_byte(hash, extents.len() as u8);
    for &e in extents {
        hash = fnv1a_bytes(hash, &e.to_le_bytes());
    }
    for &b in boundaries {
        hash = fnv1a_byte(hash, b.as_u8());
    }
    fnv1a_bytes(hash, stop_descriptor)
}
