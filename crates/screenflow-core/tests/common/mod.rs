/*
[INPUT]:  Test scenarios from the integration suites
[OUTPUT]: Shared task fixtures and polling helpers
[POS]:    Test infrastructure - shared across integration test binaries
[UPDATE]: When adding new test patterns or fixtures
*/

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use screenflow_core::{ProgressSender, Task};

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);
const WAIT_POLL: Duration = Duration::from_millis(5);

/// Poll `condition` until it holds or the shared timeout expires
pub fn wait_until(condition: impl Fn() -> bool) {
    let deadline = Instant::now() + WAIT_TIMEOUT;
    while Instant::now() < deadline {
        if condition() {
            return;
        }
        thread::sleep(WAIT_POLL);
    }
    panic!("condition not met within {WAIT_TIMEOUT:?}");
}

/// Task that counts its executions and optionally reports fixed progress
/// steps, pausing between them
pub struct CountingTask {
    runs: Arc<AtomicUsize>,
    steps: Vec<u8>,
    step_delay: Duration,
}

impl CountingTask {
    pub fn new(runs: Arc<AtomicUsize>) -> Self {
        Self {
            runs,
            steps: Vec::new(),
            step_delay: Duration::ZERO,
        }
    }

    pub fn with_steps(runs: Arc<AtomicUsize>, steps: Vec<u8>) -> Self {
        Self {
            runs,
            steps,
            step_delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }
}

impl Task for CountingTask {
    fn run(&mut self, progress: &ProgressSender) -> anyhow::Result<()> {
        for &percent in &self.steps {
            progress.send(percent);
            if !self.step_delay.is_zero() {
                thread::sleep(self.step_delay);
            }
        }
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Task that always returns an error
pub struct FailingTask;

impl Task for FailingTask {
    fn run(&mut self, _progress: &ProgressSender) -> anyhow::Result<()> {
        anyhow::bail!("simulated task failure")
    }
}

/// Task that panics mid-run
pub struct PanickingTask;

impl Task for PanickingTask {
    fn run(&mut self, _progress: &ProgressSender) -> anyhow::Result<()> {
        panic!("simulated task panic");
    }
}
