//! Checkpoint store fixtures.
//!
//! - [`RecordingStore`] keeps every saved checkpoint in order and can be
//!   told to fail after a fixed number of saves.

use std::io;

use sorb_checkpoint::{Checkpoint, CheckpointError, CheckpointStore};

/// Keeps every saved checkpoint; `load` returns the most recent one.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub saved: Vec<Checkpoint>,
    fail_after: Option<usize>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves fail once `n` have succeeded.
    pub fn failing_after(n: usize) -> Self {
        Self {
            saved: Vec::new(),
            fail_after: Some(n),
        }
    }
}

impl CheckpointStore for RecordingStore {
    fn save(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        if self.fail_after.is_some_and(|n| self.saved.len() >= n) {
            return Err(CheckpointError::Io(io::Error::other("disk full")));
        }
        self.saved.push(checkpoint.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Checkpoint>, CheckpointError> {
        Ok(self.saved.last().cloned())
    }
}
