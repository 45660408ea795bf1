//! Worker pool: isolated tasks serving one operation each.
//!
//! Workers never print. Each job carries the paths of its request and result
//! files; the worker runs the operation, writes the result file, and signals
//! the coordinator over the job's reply channel.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use till_store::fileio;

use crate::context::StoreContext;
use crate::ops;
use crate::request::OpKind;

/// One operation handed to the pool.
#[derive(Debug)]
pub struct Job {
    pub kind: OpKind,
    pub request_path: Option<PathBuf>,
    pub result_path: PathBuf,
    /// Signalled once the result file has been written.
    pub done: mpsc::SyncSender<()>,
}

/// A fixed set of worker threads fed over a channel.
pub struct WorkerPool {
    jobs: Option<mpsc::Sender<Job>>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers (at least one), each with its own store handles.
    pub fn new(ctx: StoreContext, size: usize) -> WorkerPool {
        let (tx, rx) = mpsc::channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));

        let mut workers = Vec::with_capacity(size.max(1));
        for n in 0..size.max(1) {
            let rx = Arc::clone(&rx);
            let ctx = ctx.clone();
            match thread::Builder::new()
                .name(format!("till-worker-{}", n))
                .spawn(move || worker_loop(n, ctx, rx))
            {
                Ok(handle) => workers.push(handle),
                Err(err) => log::warn!("could not spawn worker {}: {}", n, err),
            }
        }

        // With no workers at all, submit must refuse rather than queue
        // jobs nobody will ever serve.
        let jobs = if workers.is_empty() { None } else { Some(tx) };
        WorkerPool { jobs, workers }
    }

    /// Hand a job to the pool. Returns false if no worker can take it.
    pub fn submit(&self, job: Job) -> bool {
        match &self.jobs {
            Some(tx) => tx.send(job).is_ok(),
            None => false,
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the channel lets each worker's recv() fail and exit.
        drop(self.jobs.take());
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(n: usize, ctx: StoreContext, rx: Arc<Mutex<mpsc::Receiver<Job>>>) {
    loop {
        let job = {
            let guard = match rx.lock() {
                Ok(guard) => guard,
                Err(_) => break,
            };
            match guard.recv() {
                Ok(job) => job,
                Err(_) => break,
            }
        };

        log::debug!("worker {} serving {:?}", n, job.kind);
        let message = ops::run(job.kind, &ctx, job.request_path.as_deref());
        if let Err(err) = fileio::write_text(&job.result_path, &message) {
            log::warn!(
                "worker {} could not write result {}: {}",
                n,
                job.result_path.display(),
                err
            );
        }
        let _ = job.done.send(());
    }
}
