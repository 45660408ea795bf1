//! Error types for the store layer.

use std::io;
use std::path::PathBuf;

/// Errors raised by the lock manager, file I/O primitive, and record store.
///
/// Domain-level conditions (missing ids, failed validation, insufficient
/// funds) are not store errors; they belong to whoever drives the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The resource could not be opened or created.
    #[error("resource unavailable: {path}: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The locking primitive itself failed on an already-open resource.
    #[error("lock unavailable: {path}: {source}")]
    LockUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read or write on a locked resource failed partway.
    #[error("i/o failure: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True when the failure is an open on a path that does not exist.
    ///
    /// Readers treat this case as "no data" rather than an error.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::ResourceUnavailable { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected() {
        let e = StoreError::ResourceUnavailable {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.is_not_found());
    }

    #[test]
    fn other_kinds_are_not_not_found() {
        let e = StoreError::ResourceUnavailable {
            path: PathBuf::from("locked.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!e.is_not_found());

        let e = StoreError::Io {
            path: PathBuf::from("data.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(!e.is_not_found());
    }

    #[test]
    fn display_includes_path() {
        let e = StoreError::LockUnavailable {
            path: PathBuf::from("users.txt"),
            source: io::Error::new(io::ErrorKind::Other, "flock failed"),
        };
        let display = format!("{}", e);
        assert!(display.contains("lock unavailable"));
        assert!(display.contains("users.txt"));
    }
}
