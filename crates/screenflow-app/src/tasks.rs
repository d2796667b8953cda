/*
[INPUT]:  Download URL payloads and per-step pacing from configuration
[OUTPUT]: Simulated download tasks reporting stepped progress
[POS]:    Task layer - background work built from download transitions
[UPDATE]: When progress pacing or the simulation changes
*/

use std::thread;
use std::time::Duration;

use anyhow::Result;
use screenflow_core::{ProgressSender, Task, TaskFactory};
use tracing::info;

/// Progress checkpoints reported over the course of one simulated download
const PROGRESS_STEPS: [u8; 5] = [0, 25, 50, 75, 100];

/// Simulated file download: sleeps through fixed progress checkpoints
/// instead of moving bytes
pub struct DownloadTask {
    url: String,
    step_delay: Duration,
}

impl DownloadTask {
    pub fn new(url: impl Into<String>, step_delay: Duration) -> Self {
        Self {
            url: url.into(),
            step_delay,
        }
    }
}

impl Task for DownloadTask {
    fn run(&mut self, progress: &ProgressSender) -> Result<()> {
        info!(task_id = %progress.task_id(), url = %self.url, "download started");
        for &percent in &PROGRESS_STEPS {
            progress.send(percent);
            if percent < 100 {
                thread::sleep(self.step_delay);
            }
        }
        info!(task_id = %progress.task_id(), url = %self.url, "download complete");
        Ok(())
    }
}

/// Builds download tasks from transition payloads
pub struct DownloadTaskFactory {
    step_delay: Duration,
}

impl DownloadTaskFactory {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }
}

impl TaskFactory for DownloadTaskFactory {
    fn build(&self, payload: &str) -> Box<dyn Task> {
        Box::new(DownloadTask::new(payload, self.step_delay))
    }
}
