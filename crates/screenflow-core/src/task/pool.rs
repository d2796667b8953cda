/*
[INPUT]:  Boxed tasks, worker count, shared progress channel
[OUTPUT]: Fixed worker threads draining a FIFO queue with poison shutdown
[POS]:    Execution layer - background work off the dispatch thread
[UPDATE]: When changing queueing, shutdown, or fault isolation semantics
[UPDATE]: 2026-07-31 Catch task panics at the pool boundary
*/

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{ProgressSender, Task};
use crate::error::{FlowError, Result};
use crate::event::ProgressUpdate;

enum QueueItem {
    Run { id: Uuid, task: Box<dyn Task> },
    /// One per worker; the receiving worker terminates
    Poison,
}

/// Fixed-size pool of worker threads draining a shared FIFO queue.
///
/// Tasks are dequeued in submission order across the whole pool; with more
/// than one worker, completion order is unordered. The queue is unbounded
/// and enqueueing never blocks the caller.
pub struct WorkerPool {
    queue_tx: Sender<QueueItem>,
    queue_rx: Receiver<QueueItem>,
    progress_tx: Sender<ProgressUpdate>,
    workers: Vec<JoinHandle<()>>,
    shutting_down: bool,
}

impl WorkerPool {
    /// Pool reporting progress into `progress_tx`; call [`start`](Self::start)
    /// to spawn workers before enqueueing
    pub fn new(progress_tx: Sender<ProgressUpdate>) -> Self {
        let (queue_tx, queue_rx) = unbounded();
        Self {
            queue_tx,
            queue_rx,
            progress_tx,
            workers: Vec::new(),
            shutting_down: false,
        }
    }

    /// Spawn `count` worker threads
    pub fn start(&mut self, count: usize) -> Result<()> {
        for index in 0..count {
            let queue = self.queue_rx.clone();
            let progress = self.progress_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("screenflow-worker-{index}"))
                .spawn(move || worker_loop(index, queue, progress))
                .map_err(|err| FlowError::Worker(err.to_string()))?;
            self.workers.push(handle);
        }
        info!(workers = count, "worker pool started");
        Ok(())
    }

    /// Number of spawned worker threads
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Queue a task, assigning its id and binding the pool's progress
    /// sender. Non-blocking. Returns `None` once shutdown has been
    /// signaled: workers are no longer guaranteed to be listening.
    pub fn enqueue(&self, task: Box<dyn Task>) -> Option<Uuid> {
        if self.shutting_down {
            warn!("task rejected: pool is shutting down");
            return None;
        }
        let id = Uuid::new_v4();
        if self.queue_tx.send(QueueItem::Run { id, task }).is_err() {
            warn!(task_id = %id, "task rejected: queue disconnected");
            return None;
        }
        debug!(task_id = %id, "task queued");
        Some(id)
    }

    /// Signal shutdown: one poison per worker, no new tasks accepted.
    /// Tasks already queued still run to completion before the poisons
    /// are reached.
    pub fn shutdown(&mut self) {
        if self.shutting_down {
            return;
        }
        self.shutting_down = true;
        for _ in 0..self.workers.len() {
            let _ = self.queue_tx.send(QueueItem::Poison);
        }
        debug!(workers = self.workers.len(), "pool shutdown signaled");
    }

    /// Signal shutdown and join every worker
    pub fn shutdown_and_wait(&mut self) {
        self.shutdown();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("worker thread panicked outside a task");
            }
        }
        info!("worker pool drained");
    }
}

fn worker_loop(index: usize, queue: Receiver<QueueItem>, progress: Sender<ProgressUpdate>) {
    debug!(worker = index, "worker started");
    while let Ok(item) = queue.recv() {
        match item {
            QueueItem::Run { id, mut task } => {
                let sender = ProgressSender::new(id, progress.clone());
                // A task fault must not kill the worker; it keeps dequeuing.
                let outcome = catch_unwind(AssertUnwindSafe(|| task.run(&sender)));
                match outcome {
                    Ok(Ok(())) => debug!(worker = index, task_id = %id, "task finished"),
                    Ok(Err(err)) => {
                        error!(worker = index, task_id = %id, error = %err, "task failed");
                    }
                    Err(_) => error!(worker = index, task_id = %id, "task panicked"),
                }
            }
            QueueItem::Poison => break,
        }
    }
    debug!(worker = index, "worker stopped");
}
