/*
[INPUT]:  Injected events from tests and drivers, machine window operations
[OUTPUT]: Bookkeeping-only backend with a shared inspection handle
[POS]:    Reference WindowBackend - test double and demo driver surface
[UPDATE]: When the boundary contract or inspection needs change
*/

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use tracing::debug;

use super::{WindowBackend, WindowId};
use crate::error::{FlowError, Result};
use crate::event::{InputValues, WindowEvent};
use crate::layout::Layout;

/// Record of one window operation, kept for inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOp {
    Opened { name: String },
    Closed { name: String },
    Updated { name: String },
}

#[derive(Debug, Clone)]
struct OpenWindow {
    name: String,
    layout: Layout,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    windows: HashMap<u64, OpenWindow>,
    ops: Vec<WindowOp>,
}

impl Registry {
    fn id_of(&self, name: &str) -> Option<u64> {
        self.windows
            .iter()
            .find_map(|(id, win)| (win.name == name).then_some(*id))
    }
}

type RegistryHandle = Arc<Mutex<Registry>>;

#[derive(Debug, Clone)]
struct InjectedEvent {
    /// State whose window receives the event; resolved at poll time so
    /// events sent to a window that closed in the meantime are dropped,
    /// like clicks on a window that no longer exists.
    target: String,
    event: String,
    values: InputValues,
}

/// A backend without a toolkit: windows are bookkeeping entries and events
/// arrive through a [`HeadlessHandle`]. Serves as the reference
/// implementation of the boundary for tests and scripted demos.
pub struct HeadlessBackend {
    registry: RegistryHandle,
    events: Receiver<InjectedEvent>,
}

/// Cloneable, thread-safe handle for feeding events in and inspecting
/// backend state from outside the machine's thread
#[derive(Clone)]
pub struct HeadlessHandle {
    registry: RegistryHandle,
    events: Sender<InjectedEvent>,
}

impl HeadlessBackend {
    /// Build a backend plus the external handle that drives it
    pub fn new() -> (Self, HeadlessHandle) {
        let registry: RegistryHandle = Arc::default();
        let (events_tx, events_rx) = unbounded();
        let backend = Self {
            registry: Arc::clone(&registry),
            events: events_rx,
        };
        let handle = HeadlessHandle {
            registry,
            events: events_tx,
        };
        (backend, handle)
    }
}

impl WindowBackend for HeadlessBackend {
    fn open_window(&mut self, name: &str, layout: &Layout) -> Result<WindowId> {
        let mut registry = self.registry.lock().expect("headless registry lock");
        registry.next_id += 1;
        let id = registry.next_id;
        registry.windows.insert(
            id,
            OpenWindow {
                name: name.to_string(),
                layout: layout.clone(),
            },
        );
        registry.ops.push(WindowOp::Opened {
            name: name.to_string(),
        });
        debug!(window = id, name, "window opened");
        Ok(WindowId(id))
    }

    fn close_window(&mut self, window: WindowId) -> Result<()> {
        let mut registry = self.registry.lock().expect("headless registry lock");
        if let Some(win) = registry.windows.remove(&window.0) {
            registry.ops.push(WindowOp::Closed {
                name: win.name.clone(),
            });
            debug!(window = window.0, name = %win.name, "window closed");
        }
        Ok(())
    }

    fn update_window(&mut self, window: WindowId, layout: &Layout) -> Result<()> {
        let mut registry = self.registry.lock().expect("headless registry lock");
        let name = match registry.windows.get_mut(&window.0) {
            Some(win) => {
                win.layout = layout.clone();
                win.name.clone()
            }
            None => return Ok(()),
        };
        registry.ops.push(WindowOp::Updated { name });
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<WindowEvent>> {
        loop {
            let injected = match self.events.recv_timeout(timeout) {
                Ok(injected) => injected,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(FlowError::Disconnected),
            };

            let resolved = {
                let registry = self.registry.lock().expect("headless registry lock");
                registry.id_of(&injected.target)
            };
            match resolved {
                Some(id) => {
                    return Ok(Some(WindowEvent {
                        window: WindowId(id),
                        event: injected.event,
                        values: injected.values,
                    }));
                }
                None => {
                    debug!(
                        target = %injected.target,
                        event = %injected.event,
                        "event for closed window dropped"
                    );
                }
            }
        }
    }
}

impl HeadlessHandle {
    /// Fire `event` at the window currently open for `target`
    pub fn send(&self, target: &str, event: &str) {
        self.send_with(target, event, InputValues::new());
    }

    /// Fire `event` with input values. Quietly drops the event once the
    /// backend is gone.
    pub fn send_with(&self, target: &str, event: &str, values: InputValues) {
        let injected = InjectedEvent {
            target: target.to_string(),
            event: event.to_string(),
            values,
        };
        if self.events.send(injected).is_err() {
            debug!(target, event, "backend gone, event dropped");
        }
    }

    /// Whether a window is currently open for `name`
    pub fn is_open(&self, name: &str) -> bool {
        let registry = self.registry.lock().expect("headless registry lock");
        registry.id_of(name).is_some()
    }

    /// Names of all currently open windows, unordered
    pub fn open_windows(&self) -> Vec<String> {
        let registry = self.registry.lock().expect("headless registry lock");
        registry.windows.values().map(|win| win.name.clone()).collect()
    }

    /// Last rendered layout of the window open for `name`
    pub fn layout_of(&self, name: &str) -> Option<Layout> {
        let registry = self.registry.lock().expect("headless registry lock");
        let id = registry.id_of(name)?;
        registry.windows.get(&id).map(|win| win.layout.clone())
    }

    /// Full operation log since the backend was created
    pub fn ops(&self) -> Vec<WindowOp> {
        let registry = self.registry.lock().expect("headless registry lock");
        registry.ops.clone()
    }
}
