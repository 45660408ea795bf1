//! The coordinator: sole owner of the terminal.
//!
//! For each operation it writes the request payload to a fresh temp file,
//! hands the worker a job naming that file plus a result path, blocks until
//! the worker signals completion, reads the result back, and removes both
//! temp files. Workers compute; the coordinator prints.

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{SystemTime, UNIX_EPOCH};

use till_store::{fileio, StoreError};

use crate::context::StoreContext;
use crate::pool::{Job, WorkerPool};
use crate::request::OpKind;

const REQUEST_PREFIX: &str = "till_req_";
const RESULT_PREFIX: &str = "till_res_";

/// Dispatches operations to the worker pool and collects their results.
pub struct Coordinator {
    pool: WorkerPool,
    temp_dir: PathBuf,
}

impl Coordinator {
    pub fn new(ctx: StoreContext, temp_dir: PathBuf, workers: usize) -> Coordinator {
        Coordinator {
            pool: WorkerPool::new(ctx, workers),
            temp_dir,
        }
    }

    /// Run one operation through a worker and return its result message.
    ///
    /// A payload is written out only for operations that take one. Failing
    /// to write the request is the coordinator's own fault and propagates;
    /// anything that goes wrong on the worker side comes back as the
    /// result message itself.
    pub fn dispatch(&self, kind: OpKind, payload: Option<&str>) -> Result<String, StoreError> {
        let request_path = match payload {
            Some(payload) if kind.needs_request() => {
                let path = self.temp_path(REQUEST_PREFIX);
                fileio::write_text(&path, payload)?;
                Some(path)
            }
            _ => None,
        };
        let result_path = self.temp_path(RESULT_PREFIX);

        let (done_tx, done_rx) = mpsc::sync_channel(1);
        let submitted = self.pool.submit(Job {
            kind,
            request_path: request_path.clone(),
            result_path: result_path.clone(),
            done: done_tx,
        });

        let message = if submitted {
            // Blocks until the worker has written the result file.
            let _ = done_rx.recv();
            fileio::read_text(&result_path).ok().flatten().unwrap_or_default()
        } else {
            log::warn!("no worker available for {:?}", kind);
            String::new()
        };

        if let Some(path) = &request_path {
            let _ = fs::remove_file(path);
        }
        let _ = fs::remove_file(&result_path);

        Ok(message)
    }

    fn temp_path(&self, prefix: &str) -> PathBuf {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let salt = rand::random::<u32>() % 100_000;
        self.temp_dir
            .join(format!("{}{}_{:05}.tmp", prefix, secs, salt))
    }
}
