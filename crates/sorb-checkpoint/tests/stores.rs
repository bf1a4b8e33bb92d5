//! Store behavior with checkpoints captured from real lattices.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sorb_checkpoint::{
    decode_checkpoint, Checkpoint, CheckpointError, CheckpointStore, FileStore, MemoryStore,
    NullStore, RngState,
};
use sorb_core::{Boundary, Model, RepetitionId};
use sorb_stats::{ResultsAggregator, Statistics};
use sorb_test_utils::{line_with, scratch_path};

fn checkpoint(occupied: &[i64]) -> Checkpoint {
    let lattice = line_with(12, Boundary::Open, occupied);
    let statistics = Statistics::for_lattice(&lattice, false);
    Checkpoint {
        config_hash: 7,
        seed: 3,
        model: Model::Dimer,
        repetitions: 1,
        repetition: RepetitionId(0),
        lattice,
        statistics,
        aggregator: ResultsAggregator::new(),
        rng: RngState::capture(&ChaCha8Rng::seed_from_u64(3)),
    }
}

#[test]
fn null_store_never_returns_anything() {
    let mut store = NullStore;
    store.save(&checkpoint(&[1])).unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn memory_store_keeps_latest() {
    let mut store = MemoryStore::new();
    assert!(store.load().unwrap().is_none());
    store.save(&checkpoint(&[1])).unwrap();
    store.save(&checkpoint(&[1, 5])).unwrap();
    assert_eq!(store.saves(), 2);
    assert_eq!(store.load().unwrap(), Some(checkpoint(&[1, 5])));
}

#[test]
fn file_store_round_trips_and_replaces() {
    let path = scratch_path("file_store_round_trips_and_replaces");
    let mut store = FileStore::new(&path);
    assert!(store.load().unwrap().is_none());

    store.save(&checkpoint(&[0])).unwrap();
    store.save(&checkpoint(&[0, 11])).unwrap();
    assert_eq!(store.load().unwrap(), Some(checkpoint(&[0, 11])));

    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    assert!(!std::path::Path::new(&tmp).exists());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn every_truncation_is_reported_not_panicked() {
    let mut store = MemoryStore::new();
    store.save(&checkpoint(&[2, 4, 6])).unwrap();
    let bytes = store.bytes().unwrap().to_vec();
    for len in 0..bytes.len() {
        let result = decode_checkpoint(&mut &bytes[..len]);
        assert!(
            matches!(result, Err(CheckpointError::Io(_))),
            "prefix of {len} bytes decoded unexpectedly"
        );
    }
}
