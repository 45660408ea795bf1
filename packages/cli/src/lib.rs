//! Interactive front end over the till record store.
//!
//! One coordinator owns the terminal. Every operation the user picks from
//! the menu is handed to a worker task as a request file; the worker runs a
//! single load-mutate-save cycle against the data files and writes a result
//! file; the coordinator joins, reads the result, cleans up, and is the only
//! thing that ever prints. That keeps concurrent mutators from interleaving
//! output, and keeps "who computes" separate from "who owns the terminal".

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub mod context;
pub mod coordinator;
pub mod error;
pub mod menu;
pub mod ops;
pub mod pool;
pub mod request;

pub use context::StoreContext;
pub use coordinator::Coordinator;
pub use error::OpError;
pub use request::{OpKind, Request};

/// Wire everything up and run the menu loop on the given streams.
pub fn run(
    data_dir: &Path,
    temp_dir: Option<PathBuf>,
    workers: usize,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    fs::create_dir_all(data_dir)?;
    let temp_dir = temp_dir.unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&temp_dir)?;

    let ctx = StoreContext::open(data_dir);
    let coordinator = Coordinator::new(ctx, temp_dir, workers);
    menu::run_menu(input, output, &coordinator)
}
