/*
[INPUT]:  Raw backend events and worker progress reports
[OUTPUT]: Reserved event identifiers, input values, cross-thread payloads
[POS]:    Event model shared by the machine, states, and backends
[UPDATE]: When adding reserved events or payload accessors
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::backend::WindowId;

/// Reserved event id fired by a window's exit control.
pub const EVENT_EXIT: &str = "-exit-";

/// Reserved event id reported by backends when the toolkit destroyed a window
/// (the user clicked the title bar close button).
pub const EVENT_WINDOW_CLOSED: &str = "-window_closed-";

/// Reserved event id carrying a task progress percentage. States never
/// return a transition target for it; the progress owner updates its
/// rendered indicator and stays put.
pub const EVENT_PROGRESS: &str = "-progress-";

/// Input key under which the progress percentage travels.
pub const PROGRESS_KEY: &str = "progress";

/// Current values of a window's input fields, keyed by widget key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputValues(HashMap<String, Value>);

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for literals in tests and scripts
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One event read from the set of open windows
#[derive(Debug, Clone)]
pub struct WindowEvent {
    /// Window the event originated from
    pub window: WindowId,
    /// Event identifier (button key or reserved id)
    pub event: String,
    /// Input field values at the time of the event
    pub values: InputValues,
}

/// Progress report emitted by a worker thread and marshalled into the
/// main loop's event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub task_id: Uuid,
    pub percent: u8,
}
