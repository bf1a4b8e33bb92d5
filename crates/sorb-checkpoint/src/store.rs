//! Where checkpoints go.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec::{decode_checkpoint, encode_checkpoint};
use crate::error::CheckpointError;
use crate::types::Checkpoint;

/// Save/load boundary between the driver and persistent storage.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait CheckpointStore {
    /// Persist `checkpoint`, replacing whatever was saved before.
    fn save(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError>;

    /// Most recently saved checkpoint, if any.
    fn load(&mut self) -> Result<Option<Checkpoint>, CheckpointError>;
}

/// Discards every checkpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl CheckpointStore for NullStore {
    fn save(&mut self, _checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Checkpoint>, CheckpointError> {
        Ok(None)
    }
}

/// Keeps the latest checkpoint as encoded bytes in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
    saves: u64,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> u64 {
        self.saves
    }

    /// Encoded form of the latest checkpoint.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl CheckpointStore for MemoryStore {
    fn save(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        let mut buf = Vec::new();
        encode_checkpoint(&mut buf, checkpoint)?;
        self.bytes = Some(buf);
        self.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Checkpoint>, CheckpointError> {
        match &self.bytes {
            Some(bytes) => decode_checkpoint(&mut bytes.as_slice()).map(Some),
            None => Ok(None),
        }
    }
}

/// Persists the latest checkpoint to a file.
///
/// Saves write a sibling temporary file and rename it over the target,
/// so a crash mid-write never leaves a truncated checkpoint behind.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// A store backed by `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CheckpointStore for FileStore {
    fn save(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        let temp = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&temp)?);
            encode_checkpoint(&mut writer, checkpoint)?;
            writer.flush()?;
        }
        fs::rename(&temp, &self.path)?;
        debug!(
            path = %self.path.display(),
            repetition = checkpoint.repetition.0,
            attempts = checkpoint.attempts(),
            "checkpoint written"
        );
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Checkpoint>, CheckpointError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode_checkpoint(&mut BufReader::new(file)).map(Some)
    }
}
