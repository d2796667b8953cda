/*
[INPUT]:  Background work items and worker progress reports
[OUTPUT]: Task contract, progress sender, task factory
[POS]:    Task domain layer - work units executed by the pool
[UPDATE]: When the task contract or progress semantics change
*/

use crossbeam_channel::Sender;
use tracing::debug;
use uuid::Uuid;

use crate::event::ProgressUpdate;

pub mod pool;

pub use pool::WorkerPool;

/// A unit of background work, executed exactly once by exactly one worker
pub trait Task: Send {
    /// Execute synchronously on the worker thread, reporting progress as
    /// the work advances. Errors are logged at the pool boundary and never
    /// kill the worker.
    fn run(&mut self, progress: &ProgressSender) -> anyhow::Result<()>;
}

/// Builds tasks from transition payloads. The machine owns one of these;
/// states only name the work, they never construct it.
pub trait TaskFactory: Send {
    fn build(&self, payload: &str) -> Box<dyn Task>;
}

/// Thread-safe handle a task uses to report percentage progress.
///
/// Created by the pool at enqueue time, never by the task's caller.
/// Reports are marshalled into the main loop's event stream; a value of
/// 100 carries completion semantics for the consumer, and values above
/// 100 are saturated to it.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    task_id: Uuid,
    tx: Sender<ProgressUpdate>,
}

impl ProgressSender {
    pub(crate) fn new(task_id: Uuid, tx: Sender<ProgressUpdate>) -> Self {
        Self { task_id, tx }
    }

    /// Id of the task this sender is bound to
    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    /// Report progress; quietly drops the report if the consumer is gone
    pub fn send(&self, percent: u8) {
        let update = ProgressUpdate {
            task_id: self.task_id,
            percent: percent.min(100),
        };
        if self.tx.send(update).is_err() {
            debug!(task_id = %self.task_id, percent, "progress consumer gone, report dropped");
        }
    }
}
