//! Concurrency-safe flat-file record store.
//!
//! Layered bottom-up:
//! - [`lock`] - whole-file advisory locks (shared readers, exclusive writers)
//! - [`fileio`] - lock-guarded read/write of a whole text resource
//! - [`codec`] - one-record-per-line text codec over a closed [`Record`] kind
//! - [`store`] - [`RecordStore`]: load-whole / overwrite-whole access to one resource
//!
//! The store makes no durability promise beyond whole-file replace: a save
//! truncates the resource and rewrites it in place. Callers that need crash
//! atomicity must layer a shadow-copy strategy on top.

pub mod codec;
pub mod error;
pub mod fileio;
pub mod lock;
pub mod store;

pub use codec::{decode_all, encode_all, next_id, Record};
pub use error::StoreError;
pub use lock::{acquire, LockHandle, LockMode};
pub use store::RecordStore;
