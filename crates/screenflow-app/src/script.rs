/*
[INPUT]:  Scripted demo events and the headless backend handle
[OUTPUT]: Driver thread replaying the script into the event stream
[POS]:    Demo driver - stands in for a human clicking through the windows
[UPDATE]: When the demo tour or the script schema changes
*/

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use screenflow_core::{EVENT_EXIT, HeadlessHandle, InputValues};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::states::{
    CLOSE_STATE_C,
    DOWNLOAD,
    FILE_URL_KEY,
    GO_TO_INITIAL,
    GO_TO_STATE_A,
    GO_TO_STATE_B,
    GO_TO_STATE_C,
};

/// How long a step waits for its target window before it is skipped
const OPEN_TIMEOUT: Duration = Duration::from_secs(10);

/// One scripted interaction: wait, then fire `event` at `target`'s window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptStep {
    /// State whose window receives the event
    pub target: String,
    /// Event identifier to fire
    pub event: String,
    /// Input values carried with the event
    #[serde(default)]
    pub values: InputValues,
    /// Milliseconds to wait before firing
    #[serde(default = "default_step_wait_ms")]
    pub wait_ms: u64,
}

fn default_step_wait_ms() -> u64 {
    500
}

impl ScriptStep {
    pub fn new(target: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            event: event.into(),
            values: InputValues::new(),
            wait_ms: default_step_wait_ms(),
        }
    }

    pub fn with_values(mut self, values: InputValues) -> Self {
        self.values = values;
        self
    }

    pub fn after_ms(mut self, wait_ms: u64) -> Self {
        self.wait_ms = wait_ms;
        self
    }
}

/// The built-in tour: visit A and B, open and close C, download, exit.
/// The final wait leaves room for the simulated download to finish.
pub fn default_script(file_url: &str) -> Vec<ScriptStep> {
    vec![
        ScriptStep::new("initial", GO_TO_STATE_A),
        ScriptStep::new("state_a", GO_TO_STATE_B),
        ScriptStep::new("state_b", GO_TO_INITIAL),
        ScriptStep::new("initial", GO_TO_STATE_C),
        ScriptStep::new("state_c", CLOSE_STATE_C),
        ScriptStep::new("initial", DOWNLOAD)
            .with_values(InputValues::new().with(FILE_URL_KEY, file_url)),
        ScriptStep::new("initial", EVENT_EXIT).after_ms(6000),
    ]
}

/// Replay `steps` into the backend from a driver thread.
///
/// Each step waits for its target window to be open before firing, so a
/// slow dispatch loop shifts the pacing instead of dropping clicks.
pub fn spawn_driver(handle: HeadlessHandle, steps: Vec<ScriptStep>) -> JoinHandle<()> {
    thread::spawn(move || {
        for step in steps {
            thread::sleep(Duration::from_millis(step.wait_ms));
            if !wait_until_open(&handle, &step.target) {
                warn!(target = %step.target, event = %step.event, "script target never opened; step skipped");
                continue;
            }
            debug!(target = %step.target, event = %step.event, "script step");
            handle.send_with(&step.target, &step.event, step.values);
        }
    })
}

fn wait_until_open(handle: &HeadlessHandle, name: &str) -> bool {
    let deadline = Instant::now() + OPEN_TIMEOUT;
    while Instant::now() < deadline {
        if handle.is_open(name) {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    false
}
