//! Load-whole / overwrite-whole record store over one resource.

use std::io::{Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::codec::{decode_all, encode_all, Record};
use crate::error::StoreError;
use crate::fileio;
use crate::lock::{acquire, LockMode};

/// Handle on one resource holding records of kind `R`.
///
/// The store exclusively owns the in-memory sequence for the duration of one
/// load/mutate/save cycle; nothing retains references into it across cycles.
/// There is no single-record update at this layer - every mutation is "load
/// all, modify in memory, save all", which makes each mutation O(resource
/// size). That ceiling is accepted for this store's scope.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    path: PathBuf,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Record> RecordStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore {
            path: path.into(),
            _kind: PhantomData,
        }
    }

    /// Path of the underlying resource.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full decoded sequence under a shared lock.
    ///
    /// A missing resource and an empty resource both yield an empty
    /// sequence, never an error.
    pub fn load_all(&self) -> Result<Vec<R>, StoreError> {
        match fileio::read_text(&self.path)? {
            Some(contents) => Ok(decode_all(&contents)),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the resource with the re-encoded sequence under an
    /// exclusive lock. Full replace, not an append.
    pub fn save_all(&self, records: &[R]) -> Result<(), StoreError> {
        fileio::write_text(&self.path, &encode_all(records))
    }

    /// Run one load-mutate-save cycle while holding the exclusive lock for
    /// the *entire* cycle.
    ///
    /// Two writers racing on the same resource each need the lock across
    /// their whole cycle, load included - locking only around the save loses
    /// updates. The resource is created if missing, so the first mutation on
    /// a fresh data directory just works.
    ///
    /// The write-back is skipped when the closure leaves the sequence
    /// unchanged, so a rejected mutation leaves the resource untouched.
    pub fn update<T>(&self, mutate: impl FnOnce(&mut Vec<R>) -> T) -> Result<T, StoreError> {
        let mut handle = acquire(&self.path, LockMode::Exclusive)?;

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let mut contents = String::new();
        let mut reader = handle.file();
        reader.read_to_string(&mut contents).map_err(io_err)?;

        let mut records = decode_all(&contents);
        let before = encode_all(&records);

        let out = mutate(&mut records);

        let after = encode_all(&records);
        if after != before {
            let file = handle.file_mut();
            file.seek(SeekFrom::Start(0)).map_err(io_err)?;
            file.set_len(0).map_err(io_err)?;
            file.write_all(after.as_bytes()).map_err(io_err)?;
            log::debug!(
                "rewrote {} with {} records",
                self.path.display(),
                records.len()
            );
        }

        Ok(out)
    }
}
