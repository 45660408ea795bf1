//! Lock-guarded whole-file text I/O.
//!
//! Every persistent resource in the system - data files and the
//! coordinator's request/result hand-off files alike - goes through these
//! two functions, so the locking discipline is uniform: shared lock for the
//! duration of a read, exclusive lock for the duration of a write.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::StoreError;
use crate::lock::{acquire, LockMode};

/// Read a resource's full contents under a shared lock.
///
/// Returns `Ok(None)` when the resource does not exist; callers treat that
/// identically to an empty resource.
pub fn read_text(path: &Path) -> Result<Option<String>, StoreError> {
    let handle = match acquire(path, LockMode::Shared) {
        Ok(handle) => handle,
        Err(err) if err.is_not_found() => return Ok(None),
        Err(err) => return Err(err),
    };

    let mut contents = String::new();
    let mut file = handle.file();
    file.read_to_string(&mut contents)
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("read {} bytes from {}", contents.len(), path.display());
    Ok(Some(contents))
}

/// Overwrite a resource under an exclusive lock: truncate, then write all.
///
/// This is a full replace, not an append. A crash between the truncate and
/// the final write leaves the resource empty or partial; no shadow copy or
/// rename step guards against that.
pub fn write_text(path: &Path, contents: &str) -> Result<(), StoreError> {
    let mut handle = acquire(path, LockMode::Exclusive)?;

    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = handle.file_mut();
    file.set_len(0).map_err(io_err)?;
    file.write_all(contents.as_bytes()).map_err(io_err)?;

    log::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
