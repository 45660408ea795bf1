//! Whole-file advisory locking.
//!
//! One lock per resource, covering the entire file: shared for readers,
//! exclusive for writers. Acquisition blocks until the lock is grantable;
//! there is no timeout and no retry with backoff. The grant order among
//! multiple waiters is whatever the OS decides - no fairness is promised.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::StoreError;

/// Lock flavor for one acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Shared: any number of concurrent holders, readers only.
    Shared,
    /// Exclusive: sole holder, excludes shared and exclusive alike.
    Exclusive,
}

/// A held lock on one resource.
///
/// The handle owns the open descriptor; I/O performed while the handle is
/// alive happens under the lock. Dropping the handle releases the lock.
#[derive(Debug)]
pub struct LockHandle {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl LockHandle {
    /// The locked file, for I/O under the lock.
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Mutable access to the locked file.
    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// Path of the locked resource.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode this handle was acquired with.
    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for LockHandle {
    fn drop(&mut self) {
        // The OS releases the lock with the descriptor anyway; unlocking
        // explicitly keeps the release visible in logs.
        let _ = self.file.unlock();
        log::debug!("released {:?} lock: {}", self.mode, self.path.display());
    }
}

/// Acquire a whole-file lock on `path`, blocking until granted.
///
/// `Shared` opens the resource read-only and fails if it does not exist
/// (callers map that case to "no data" via [`StoreError::is_not_found`]).
/// `Exclusive` opens read/write and creates the resource if missing.
///
/// # Errors
///
/// `ResourceUnavailable` when the file cannot be opened or created,
/// `LockUnavailable` when the locking primitive itself fails.
pub fn acquire(path: &Path, mode: LockMode) -> Result<LockHandle, StoreError> {
    let file = match mode {
        LockMode::Shared => File::open(path),
        LockMode::Exclusive => OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path),
    }
    .map_err(|source| StoreError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    match mode {
        LockMode::Shared => file.lock_shared(),
        LockMode::Exclusive => file.lock_exclusive(),
    }
    .map_err(|source| StoreError::LockUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("acquired {:?} lock: {}", mode, path.display());
    Ok(LockHandle {
        file,
        path: path.to_path_buf(),
        mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn touch(path: &Path) {
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn shared_then_release_then_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resource.txt");
        touch(&path);

        let shared = acquire(&path, LockMode::Shared).unwrap();
        assert_eq!(shared.mode(), LockMode::Shared);
        drop(shared);

        let exclusive = acquire(&path, LockMode::Exclusive).unwrap();
        assert_eq!(exclusive.mode(), LockMode::Exclusive);
    }

    #[test]
    fn shared_locks_coexist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resource.txt");
        touch(&path);

        let first = acquire(&path, LockMode::Shared).unwrap();
        // Second shared acquisition must be granted without waiting on the first.
        let second = acquire(&path, LockMode::Shared).unwrap();
        drop(first);
        drop(second);
    }

    #[test]
    fn exclusive_blocks_second_exclusive_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resource.txt");
        touch(&path);

        let held = acquire(&path, LockMode::Exclusive).unwrap();

        let (granted_tx, granted_rx) = mpsc::channel();
        let contender_path = path.clone();
        let contender = thread::spawn(move || {
            let handle = acquire(&contender_path, LockMode::Exclusive).unwrap();
            granted_tx.send(()).unwrap();
            drop(handle);
        });

        // The contender must still be blocked while we hold the lock.
        assert!(granted_rx
            .recv_timeout(Duration::from_millis(200))
            .is_err());

        drop(held);

        // Once released, the contender gets the lock promptly.
        granted_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("contender never acquired the lock after release");
        contender.join().unwrap();
    }

    #[test]
    fn exclusive_blocks_shared_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resource.txt");
        touch(&path);

        let held = acquire(&path, LockMode::Exclusive).unwrap();

        let (granted_tx, granted_rx) = mpsc::channel();
        let reader_path = path.clone();
        let reader = thread::spawn(move || {
            let handle = acquire(&reader_path, LockMode::Shared).unwrap();
            granted_tx.send(()).unwrap();
            drop(handle);
        });

        assert!(granted_rx
            .recv_timeout(Duration::from_millis(200))
            .is_err());

        drop(held);

        granted_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("reader never acquired the lock after release");
        reader.join().unwrap();
    }

    #[test]
    fn shared_open_of_missing_resource_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let err = acquire(&path, LockMode::Shared).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn exclusive_creates_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");

        let handle = acquire(&path, LockMode::Exclusive).unwrap();
        assert!(handle.path().exists());
    }
}
