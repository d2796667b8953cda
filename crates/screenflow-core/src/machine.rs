/*
[INPUT]:  Registered states, a WindowBackend, dispatch and pool configuration
[OUTPUT]: Event dispatch loop driving windows and background tasks
[POS]:    Coordination layer - owns registry, open windows, and pool lifecycle
[UPDATE]: When routing, transition application, or shutdown order changes
[UPDATE]: 2026-07-30 Route window-closed events from secondaries as close
*/

use std::collections::HashMap;
use std::time::Duration;

use crossbeam_channel::{Receiver, unbounded};
use tracing::{debug, info, warn};

use crate::backend::{WindowBackend, WindowId};
use crate::error::{FlowError, Result};
use crate::event::{
    EVENT_EXIT,
    EVENT_PROGRESS,
    EVENT_WINDOW_CLOSED,
    InputValues,
    PROGRESS_KEY,
    ProgressUpdate,
    WindowEvent,
};
use crate::state::{State, Transition};
use crate::task::{TaskFactory, WorkerPool};

/// Tuning knobs for the dispatch loop and the pool
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Bound on each wait for the next window event; the loop re-checks
    /// its termination conditions at least this often
    pub poll_interval: Duration,
    /// Worker threads executing background tasks
    pub workers: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            workers: 1,
        }
    }
}

/// Owns the state registry, the set of open windows, and the worker pool,
/// and routes every window event to the state that owns it.
///
/// Exactly one primary state is active while the machine runs; any number
/// of secondary states may be layered over it, tracked in opening order.
/// Progress reports from worker threads arrive over an internal channel
/// and are replayed into the primary state as the reserved progress event.
pub struct StateMachine {
    backend: Box<dyn WindowBackend>,
    states: HashMap<String, Box<dyn State>>,
    windows: HashMap<WindowId, String>,
    primary: String,
    secondary: Vec<String>,
    pool: WorkerPool,
    progress_rx: Receiver<ProgressUpdate>,
    task_factory: Option<Box<dyn TaskFactory>>,
    config: MachineConfig,
}

impl StateMachine {
    pub fn new(backend: Box<dyn WindowBackend>, config: MachineConfig) -> Self {
        let (progress_tx, progress_rx) = unbounded();
        Self {
            backend,
            states: HashMap::new(),
            windows: HashMap::new(),
            primary: String::new(),
            secondary: Vec::new(),
            pool: WorkerPool::new(progress_tx),
            progress_rx,
            task_factory: None,
            config,
        }
    }

    /// Register a state under its unique name
    pub fn register_state(&mut self, state: Box<dyn State>) -> Result<()> {
        let name = state.name().to_string();
        if self.states.contains_key(&name) {
            return Err(FlowError::DuplicateState { name });
        }
        self.states.insert(name, state);
        Ok(())
    }

    /// Factory used to build background tasks from download transitions
    pub fn set_task_factory(&mut self, factory: Box<dyn TaskFactory>) {
        self.task_factory = Some(factory);
    }

    /// Name of the active primary state; empty before [`run`](Self::run)
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Names of currently open secondary states, in opening order
    pub fn secondaries(&self) -> &[String] {
        &self.secondary
    }

    /// Run the dispatch loop until the primary window exits.
    ///
    /// Starts the worker pool, opens the initial window, and on termination
    /// closes every remaining window and drains the pool before returning.
    pub fn run(&mut self, initial: &str) -> Result<()> {
        if !self.states.contains_key(initial) {
            return Err(FlowError::UnknownState {
                name: initial.to_string(),
            });
        }
        self.primary = initial.to_string();
        self.pool.start(self.config.workers)?;
        info!(initial, workers = self.config.workers, "state machine started");

        let result = self
            .open_window(initial)
            .and_then(|()| self.dispatch_loop());

        if let Err(err) = self.close_all_windows() {
            warn!(error = %err, "window cleanup failed");
        }
        self.pool.shutdown_and_wait();
        info!("state machine stopped");
        result
    }

    fn dispatch_loop(&mut self) -> Result<()> {
        loop {
            self.drain_progress()?;

            let Some(event) = self.backend.poll_event(self.config.poll_interval)? else {
                continue;
            };
            let Some(owner) = self.windows.get(&event.window).cloned() else {
                warn!(window = event.window.0, event = %event.event, "event for unknown window ignored");
                continue;
            };

            if owner == self.primary {
                if event.event == EVENT_EXIT || event.event == EVENT_WINDOW_CLOSED {
                    info!(state = %owner, "exit requested");
                    return Ok(());
                }
                self.dispatch_primary(&event)?;
            } else {
                self.dispatch_secondary(&owner, &event)?;
            }
        }
    }

    /// Replay queued worker progress into the progress owner (the primary
    /// state) and re-render its window
    fn drain_progress(&mut self) -> Result<()> {
        while let Ok(update) = self.progress_rx.try_recv() {
            debug!(task_id = %update.task_id, percent = update.percent, "progress update");
            let mut values = InputValues::new();
            values.set(PROGRESS_KEY, update.percent);

            let owner = self.primary.clone();
            if let Some(state) = self.states.get_mut(&owner) {
                state.transition(EVENT_PROGRESS, &values);
            }
            self.refresh_window(&owner)?;
        }
        Ok(())
    }

    fn dispatch_primary(&mut self, event: &WindowEvent) -> Result<()> {
        let primary = self.primary.clone();
        let transition = match self.states.get_mut(&primary) {
            Some(state) => state.transition(&event.event, &event.values),
            None => return Err(FlowError::UnknownState { name: primary }),
        };
        debug!(state = %primary, event = %event.event, ?transition, "primary transition");

        match transition {
            Transition::Stay => Ok(()),
            Transition::Close => {
                debug!(state = %primary, "close from primary ignored");
                Ok(())
            }
            Transition::Goto(target) => self.swap_primary(&target),
            Transition::OpenSecondary(target) => self.open_secondary(&target),
            Transition::Download { url } => self.spawn_background(&url),
        }
    }

    fn dispatch_secondary(&mut self, owner: &str, event: &WindowEvent) -> Result<()> {
        if event.event == EVENT_WINDOW_CLOSED {
            // the toolkit already destroyed the window; drop the bookkeeping
            return self.close_secondary(owner);
        }
        let transition = match self.states.get_mut(owner) {
            Some(state) => state.transition(&event.event, &event.values),
            None => {
                warn!(state = %owner, "secondary state missing from registry");
                return Ok(());
            }
        };
        match transition {
            Transition::Close => self.close_secondary(owner),
            other => {
                debug!(state = %owner, ?other, "secondary transition ignored");
                Ok(())
            }
        }
    }

    fn swap_primary(&mut self, target: &str) -> Result<()> {
        if target == self.primary {
            // same-name target: window stays open, nothing to re-render
            return Ok(());
        }
        if !self.states.contains_key(target) {
            return Err(FlowError::UnknownState {
                name: target.to_string(),
            });
        }
        let previous = self.primary.clone();
        self.close_window(&previous)?;
        self.primary = target.to_string();
        self.open_window(target)?;
        info!(from = %previous, to = %target, "primary state changed");
        Ok(())
    }

    fn open_secondary(&mut self, target: &str) -> Result<()> {
        if !self.states.contains_key(target) {
            return Err(FlowError::UnknownState {
                name: target.to_string(),
            });
        }
        self.open_window(target)?;
        if !self.secondary.iter().any(|name| name == target) {
            self.secondary.push(target.to_string());
        }
        debug!(state = %target, "secondary opened");
        Ok(())
    }

    fn close_secondary(&mut self, name: &str) -> Result<()> {
        self.close_window(name)?;
        self.secondary.retain(|open| open != name);
        debug!(state = %name, "secondary closed");
        Ok(())
    }

    fn spawn_background(&mut self, url: &str) -> Result<()> {
        let factory = self.task_factory.as_ref().ok_or(FlowError::NoTaskFactory)?;
        let task = factory.build(url);
        match self.pool.enqueue(task) {
            Some(id) => info!(task_id = %id, url, "background task queued"),
            None => warn!(url, "background task rejected"),
        }
        Ok(())
    }

    /// Open the window for `name`; a no-op if it is already open
    fn open_window(&mut self, name: &str) -> Result<()> {
        if self.window_of(name).is_some() {
            debug!(state = %name, "window already open");
            return Ok(());
        }
        let layout = match self.states.get(name) {
            Some(state) => state.layout(),
            None => {
                return Err(FlowError::UnknownState {
                    name: name.to_string(),
                });
            }
        };
        let id = self.backend.open_window(name, &layout)?;
        self.windows.insert(id, name.to_string());
        Ok(())
    }

    /// Close the window for `name`; a no-op if it is not open
    fn close_window(&mut self, name: &str) -> Result<()> {
        let Some(id) = self.window_of(name) else {
            return Ok(());
        };
        self.backend.close_window(id)?;
        self.windows.remove(&id);
        Ok(())
    }

    fn refresh_window(&mut self, name: &str) -> Result<()> {
        let Some(id) = self.window_of(name) else {
            return Ok(());
        };
        let Some(state) = self.states.get(name) else {
            return Ok(());
        };
        let layout = state.layout();
        self.backend.update_window(id, &layout)
    }

    fn close_all_windows(&mut self) -> Result<()> {
        // snapshot: closing mutates the window map
        let open: Vec<String> = self.windows.values().cloned().collect();
        for name in open {
            self.close_window(&name)?;
        }
        self.secondary.clear();
        Ok(())
    }

    fn window_of(&self, name: &str) -> Option<WindowId> {
        self.windows
            .iter()
            .find_map(|(id, owner)| (owner == name).then_some(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::layout::Layout;

    struct NullState {
        name: &'static str,
    }

    impl State for NullState {
        fn name(&self) -> &str {
            self.name
        }

        fn layout(&self) -> Layout {
            Layout::new(self.name)
        }

        fn transition(&mut self, _event: &str, _values: &InputValues) -> Transition {
            Transition::Stay
        }
    }

    fn machine() -> StateMachine {
        let (backend, _handle) = HeadlessBackend::new();
        StateMachine::new(Box::new(backend), MachineConfig::default())
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut machine = machine();
        machine
            .register_state(Box::new(NullState { name: "home" }))
            .expect("first registration");

        let err = machine
            .register_state(Box::new(NullState { name: "home" }))
            .expect_err("duplicate registration");
        assert!(matches!(err, FlowError::DuplicateState { name } if name == "home"));
    }

    #[test]
    fn test_run_rejects_unknown_initial() {
        let mut machine = machine();
        let err = machine.run("ghost").expect_err("unknown initial state");
        assert!(matches!(err, FlowError::UnknownState { ref name } if name == "ghost"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_open_secondary_appends_once() {
        let mut machine = machine();
        machine
            .register_state(Box::new(NullState { name: "home" }))
            .expect("register home");
        machine
            .register_state(Box::new(NullState { name: "popup" }))
            .expect("register popup");
        machine.primary = "home".to_string();

        machine.open_secondary("popup").expect("open popup");
        machine.open_secondary("popup").expect("reopen popup");
        assert_eq!(machine.secondaries(), ["popup".to_string()]);

        machine.close_secondary("popup").expect("close popup");
        assert!(machine.secondaries().is_empty());
        // closing again is a no-op
        machine.close_secondary("popup").expect("close popup again");
    }

    #[test]
    fn test_swap_to_unknown_target_fails_fast() {
        let mut machine = machine();
        machine
            .register_state(Box::new(NullState { name: "home" }))
            .expect("register home");
        machine.primary = "home".to_string();

        let err = machine.swap_primary("ghost").expect_err("unknown target");
        assert!(matches!(err, FlowError::UnknownState { name } if name == "ghost"));

        let err = machine.open_secondary("ghost").expect_err("unknown target");
        assert!(matches!(err, FlowError::UnknownState { name } if name == "ghost"));
    }

    #[test]
    fn test_swap_to_current_primary_is_noop() {
        let mut machine = machine();
        machine
            .register_state(Box::new(NullState { name: "home" }))
            .expect("register home");
        machine.primary = "home".to_string();
        machine.open_window("home").expect("open home");

        machine.swap_primary("home").expect("same-name swap");
        assert_eq!(machine.primary(), "home");
        assert!(machine.window_of("home").is_some());
    }
}
