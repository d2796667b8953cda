/*
[INPUT]:  Window identities, layout descriptors, poll timeouts
[OUTPUT]: WindowBackend trait - the GUI toolkit boundary
[POS]:    Boundary layer - the machine's only view of the toolkit
[UPDATE]: When the boundary contract changes
*/

use std::time::Duration;

use crate::error::Result;
use crate::event::WindowEvent;
use crate::layout::Layout;

pub mod headless;

pub use headless::{HeadlessBackend, HeadlessHandle, WindowOp};

/// Opaque identity of one open window, assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// The machine's contract with the GUI toolkit.
///
/// Implementations own the real windows; the machine only sees identities
/// and layout descriptors. Backends report the toolkit's own close control
/// as the reserved [`crate::event::EVENT_WINDOW_CLOSED`] event id.
pub trait WindowBackend: Send {
    /// Create a window for the state `name` and return its identity
    fn open_window(&mut self, name: &str, layout: &Layout) -> Result<WindowId>;

    /// Destroy a window; unknown identities are a no-op
    fn close_window(&mut self, window: WindowId) -> Result<()>;

    /// Re-render a window from a fresh layout
    fn update_window(&mut self, window: WindowId, layout: &Layout) -> Result<()>;

    /// Block up to `timeout` for the next event from any open window.
    ///
    /// Returns `Ok(None)` on timeout so the caller can re-check its own
    /// termination conditions between waits.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<WindowEvent>>;
}
