/*
[INPUT]:  Window events and input values from the dispatch loop
[OUTPUT]: State trait and transition outcomes
[POS]:    State contract - one implementation per screen
[UPDATE]: When transition semantics change
*/

use crate::event::InputValues;
use crate::layout::Layout;

/// Outcome of feeding one event to a state.
///
/// Carries the machine-level meanings the machine applies:
/// - `Stay`: unrecognized event or handled in place; nothing to do
/// - `Goto`: swap the primary screen to the named state
/// - `OpenSecondary`: layer the named screen over the primary one
/// - `Download`: enqueue a background task built from the payload
/// - `Close`: this secondary screen is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(String),
    OpenSecondary(String),
    Download { url: String },
    Close,
}

/// One screen: a name, a derivable layout, and an event handler.
///
/// The window handle belongs to the machine and is created on open and
/// forgotten on close; the state object itself persists across open/close
/// cycles and may carry rendered values (such as a progress percentage)
/// between them.
pub trait State: Send {
    /// Unique registry key
    fn name(&self) -> &str;

    /// Declarative layout, re-derivable at any time
    fn layout(&self) -> Layout;

    /// Compute the outcome for `event` given the window's input values.
    ///
    /// Unrecognized events return [`Transition::Stay`]. The reserved
    /// progress event never returns a transition target: the owning state
    /// records the percentage and stays put.
    fn transition(&mut self, event: &str, values: &InputValues) -> Transition;
}
