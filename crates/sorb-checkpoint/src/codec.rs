//! Binary encode/decode for the checkpoint format.
//!
//! All integers are little-endian. Arrays are prefixed with their element
//! count. There is no compression, padding or self-describing schema.

use std::io::{self, Read, Write};
use std::num::NonZeroU64;

use indexmap::IndexMap;
use sorb_core::{Boundary, CellState, Model, RepetitionId};
use sorb_lattice::Lattice;
use sorb_stats::{Metric, ResultsAggregator, Statistics, TimeSeries};

use crate::error::CheckpointError;
use crate::types::{Checkpoint, RngState};
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), CheckpointError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), CheckpointError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), CheckpointError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u128.
pub fn write_u128_le(w: &mut dyn Write, v: u128) -> Result<(), CheckpointError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, CheckpointError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, CheckpointError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, CheckpointError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian u128.
pub fn read_u128_le(r: &mut dyn Read) -> Result<u128, CheckpointError> {
    let mut buf = [0u8; 16];
    r.read_exact(&mut buf)?;
    Ok(u128::from_le_bytes(buf))
}

fn malformed(detail: impl Into<String>) -> CheckpointError {
    CheckpointError::Malformed {
        detail: detail.into(),
    }
}

// ── Checkpoint encode/decode ────────────────────────────────────

/// Encode a complete checkpoint, header included.
pub fn encode_checkpoint(w: &mut dyn Write, cp: &Checkpoint) -> Result<(), CheckpointError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;

    // Identity
    write_u64_le(w, cp.config_hash)?;
    write_u64_le(w, cp.seed)?;
    write_u8(w, cp.model.as_u8())?;
    write_u32_le(w, cp.repetitions)?;
    write_u32_le(w, cp.repetition.0)?;

    encode_lattice(w, &cp.lattice)?;

    // Statistics of the repetition in progress
    write_u64_le(w, cp.statistics.site_count())?;
    write_u64_le(w, cp.statistics.attempts())?;
    write_u64_le(w, cp.statistics.successful())?;
    encode_series(w, cp.statistics.iter())?;

    // Sums over finished repetitions
    write_u64_le(w, cp.aggregator.site_count().unwrap_or(0))?;
    write_u64_le(w, cp.aggregator.simulations())?;
    encode_series(w, cp.aggregator.iter())?;

    // RNG
    w.write_all(&cp.rng.seed)?;
    write_u64_le(w, cp.rng.stream)?;
    write_u128_le(w, cp.rng.word_pos)?;

    Ok(())
}

/// Decode and validate a complete checkpoint.
pub fn decode_checkpoint(r: &mut dyn Read) -> Result<Checkpoint, CheckpointError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(CheckpointError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(CheckpointError::UnsupportedVersion { found: version });
    }

    let config_hash = read_u64_le(r)?;
    let seed = read_u64_le(r)?;
    let model_tag = read_u8(r)?;
    let model =
        Model::from_u8(model_tag).ok_or_else(|| malformed(format!("unknown model tag {model_tag}")))?;
    let repetitions = read_u32_le(r)?;
    let repetition = RepetitionId(read_u32_le(r)?);

    let lattice = decode_lattice(r)?;

    let stats_sites = NonZeroU64::new(read_u64_le(r)?)
        .ok_or_else(|| malformed("statistics site count is zero"))?;
    let attempts = read_u64_le(r)?;
    let successful = read_u64_le(r)?;
    let series = decode_series(r)?;
    let statistics = Statistics::restore(stats_sites, attempts, successful, series)
        .map_err(|e| malformed(e.to_string()))?;

    let agg_sites = read_u64_le(r)?;
    let simulations = read_u64_le(r)?;
    let sums = decode_series(r)?;
    let aggregator = ResultsAggregator::restore(agg_sites, simulations, sums)
        .map_err(|e| malformed(e.to_string()))?;

    let mut rng_seed = [0u8; 32];
    r.read_exact(&mut rng_seed)?;
    let rng = RngState {
        seed: rng_seed,
        stream: read_u64_le(r)?,
        word_pos: read_u128_le(r)?,
    };

    let checkpoint = Checkpoint {
        config_hash,
        seed,
        model,
        repetitions,
        repetition,
        lattice,
        statistics,
        aggregator,
        rng,
    };
    checkpoint.check_consistency()?;
    Ok(checkpoint)
}

// ── Sections ────────────────────────────────────────────────────

fn encode_lattice(w: &mut dyn Write, lattice: &Lattice) -> Result<(), CheckpointError> {
    write_u8(w, lattice.ndim() as u8)?;
    for &extent in lattice.extents() {
        write_u32_le(w, extent)?;
    }
    for &boundary in lattice.boundaries() {
        write_u8(w, boundary.as_u8())?;
    }
    write_u64_le(w, lattice.site_count() as u64)?;
    let cells: Vec<u8> = lattice.cells().iter().map(|c| c.as_u8()).collect();
    w.write_all(&cells)?;
    Ok(())
}

fn decode_lattice(r: &mut dyn Read) -> Result<Lattice, CheckpointError> {
    let ndim = read_u8(r)? as usize;
    if !(1..=2).contains(&ndim) {
        return Err(malformed(format!("lattice has {ndim} axes")));
    }
    let mut extents = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        extents.push(read_u32_le(r)?);
    }
    let mut boundaries = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        let tag = read_u8(r)?;
        boundaries
            .push(Boundary::from_u8(tag).ok_or_else(|| malformed(format!("unknown boundary tag {tag}")))?);
    }
    let expected =
        Lattice::site_count_for(&extents, &boundaries).map_err(|e| malformed(e.to_string()))?;
    let count = read_u64_le(r)?;
    if count != expected as u64 {
        return Err(malformed(format!(
            "lattice declares {count} cells for extents {extents:?}"
        )));
    }
    // The buffer grows only as bytes arrive: `count` is untrusted.
    let mut raw = Vec::new();
    (&mut *r).take(count).read_to_end(&mut raw)?;
    if raw.len() != expected {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("lattice cells cut short at {} of {expected}", raw.len()),
        )
        .into());
    }
    let cells = raw
        .into_iter()
        .map(|tag| CellState::from_u8(tag).ok_or_else(|| malformed(format!("unknown cell tag {tag}"))))
        .collect::<Result<Vec<_>, _>>()?;
    Lattice::from_cells(&extents, &boundaries, cells).map_err(|e| malformed(e.to_string()))
}

fn encode_series<'a>(
    w: &mut dyn Write,
    series: impl Iterator<Item = (Metric, &'a TimeSeries)>,
) -> Result<(), CheckpointError> {
    let series: Vec<_> = series.collect();
    write_u8(w, series.len() as u8)?;
    for (metric, s) in series {
        write_u8(w, metric.as_u8())?;
        write_u32_le(w, s.len() as u32)?;
        for &(t, v) in s.points() {
            write_u64_le(w, t)?;
            write_u64_le(w, v)?;
        }
    }
    Ok(())
}

fn decode_series(r: &mut dyn Read) -> Result<IndexMap<Metric, TimeSeries>, CheckpointError> {
    let metric_count = read_u8(r)?;
    let mut series = IndexMap::with_capacity(metric_count as usize);
    for _ in 0..metric_count {
        let tag = read_u8(r)?;
        let metric = Metric::from_u8(tag).ok_or_else(|| malformed(format!("unknown metric tag {tag}")))?;
        let len = read_u32_le(r)? as usize;
        // Cap the pre-allocation: `len` is untrusted until the reads succeed.
        let mut points = Vec::with_capacity(len.min(4096));
        for _ in 0..len {
            points.push((read_u64_le(r)?, read_u64_le(r)?));
        }
        if series.insert(metric, TimeSeries::from_points(points)).is_some() {
            return Err(malformed(format!("duplicate {metric} series")));
        }
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use smallvec::smallvec;

    fn sample_checkpoint() -> Checkpoint {
        let mut lattice = Lattice::line(10, Boundary::Periodic).unwrap();
        let mut stats = Statistics::for_lattice(&lattice, true);
        let mut aggregator = ResultsAggregator::new();
        for i in 0..12i64 {
            let ok = lattice.particle_adsorb(&[smallvec![i * 3]]);
            stats.record(&lattice, ok);
        }
        aggregator.add(&stats).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(17);
        rng.set_stream(1);
        let _: u64 = rng.random();

        Checkpoint {
            config_hash: 0xDEAD_BEEF,
            seed: 17,
            model: Model::Monomer,
            repetitions: 3,
            repetition: RepetitionId(1),
            lattice,
            statistics: stats,
            aggregator,
            rng: RngState::capture(&rng),
        }
    }

    fn encode(cp: &Checkpoint) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_checkpoint(&mut buf, cp).unwrap();
        buf
    }

    #[test]
    fn decode_restores_every_part() {
        let cp = sample_checkpoint();
        let decoded = decode_checkpoint(&mut encode(&cp).as_slice()).unwrap();
        assert_eq!(decoded, cp);
        assert_eq!(decoded.attempts(), 12);
    }

    #[test]
    fn header_is_magic_then_version() {
        let buf = encode(&sample_checkpoint());
        assert_eq!(&buf[..4], b"SORB");
        assert_eq!(buf[4], FORMAT_VERSION);
    }

    #[test]
    fn wrong_magic_rejected() {
        let mut buf = encode(&sample_checkpoint());
        buf[0] = b'X';
        assert!(matches!(
            decode_checkpoint(&mut buf.as_slice()),
            Err(CheckpointError::InvalidMagic)
        ));
    }

    #[test]
    fn future_version_rejected() {
        let mut buf = encode(&sample_checkpoint());
        buf[4] = FORMAT_VERSION + 1;
        assert!(matches!(
            decode_checkpoint(&mut buf.as_slice()),
            Err(CheckpointError::UnsupportedVersion { found }) if found == FORMAT_VERSION + 1
        ));
    }

    #[test]
    fn unknown_model_tag_is_malformed() {
        let mut buf = encode(&sample_checkpoint());
        // magic(4) + version(1) + config_hash(8) + seed(8)
        buf[21] = 9;
        assert!(matches!(
            decode_checkpoint(&mut buf.as_slice()),
            Err(CheckpointError::Malformed { .. })
        ));
    }

    #[test]
    fn inconsistent_repetition_is_malformed() {
        let mut cp = sample_checkpoint();
        cp.repetition = RepetitionId(2);
        let buf = encode(&cp);
        let err = decode_checkpoint(&mut buf.as_slice()).unwrap_err();
        assert!(err.to_string().contains("summed before repetition 2"));
    }

    /// A valid checkpoint prefix followed by a hand-built lattice header.
    fn lattice_header(extents: &[u32], boundary_tags: &[u8], cells: u64) -> Vec<u8> {
        let mut buf = encode(&sample_checkpoint());
        // magic, version, config_hash, seed, model, repetitions, repetition
        buf.truncate(4 + 1 + 8 + 8 + 1 + 4 + 4);
        buf.push(extents.len() as u8);
        for e in extents {
            buf.extend_from_slice(&e.to_le_bytes());
        }
        buf.extend_from_slice(boundary_tags);
        buf.extend_from_slice(&cells.to_le_bytes());
        buf
    }

    #[test]
    fn oversized_extents_are_malformed() {
        let buf = lattice_header(&[u32::MAX, u32::MAX], &[0, 0], u64::from(u32::MAX).pow(2));
        match decode_checkpoint(&mut buf.as_slice()) {
            Err(CheckpointError::Malformed { detail }) => assert!(detail.contains("extent")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn huge_lattice_without_cells_is_an_io_error() {
        let side = Lattice::MAX_EXTENT;
        let buf = lattice_header(&[side, side], &[1, 1], u64::from(side).pow(2));
        assert!(matches!(
            decode_checkpoint(&mut buf.as_slice()),
            Err(CheckpointError::Io(_))
        ));
    }

    #[test]
    fn zero_extent_is_malformed() {
        let buf = lattice_header(&[0], &[1], 0);
        assert!(matches!(
            decode_checkpoint(&mut buf.as_slice()),
            Err(CheckpointError::Malformed { .. })
        ));
    }

    #[test]
    fn truncated_data_is_an_io_error() {
        let buf = encode(&sample_checkpoint());
        let cut = &buf[..buf.len() - 1];
        assert!(matches!(
            decode_checkpoint(&mut &cut[..]),
            Err(CheckpointError::Io(_))
        ));
    }
}
