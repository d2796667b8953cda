/*
[INPUT]:  Button events
[OUTPUT]: State C transitions
[POS]:    State variant - example secondary screen
[UPDATE]: When buttons change
*/

use screenflow_core::{InputValues, Layout, State, Transition, Widget};

use super::CLOSE_STATE_C;

/// Example screen C, opened layered over the primary screen
pub struct StateC;

impl StateC {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StateC {
    fn default() -> Self {
        Self::new()
    }
}

impl State for StateC {
    fn name(&self) -> &str {
        "state_c"
    }

    fn layout(&self) -> Layout {
        Layout::new("State C")
            .row(vec![Widget::text("You are in State C.")])
            .row(vec![Widget::button("Close the State C window", CLOSE_STATE_C)])
    }

    fn transition(&mut self, event: &str, _values: &InputValues) -> Transition {
        match event {
            CLOSE_STATE_C => Transition::Close,
            _ => Transition::Stay,
        }
    }
}
