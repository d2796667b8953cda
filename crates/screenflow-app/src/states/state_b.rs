/*
[INPUT]:  Button events
[OUTPUT]: State B transitions
[POS]:    State variant - example screen B
[UPDATE]: When buttons change
*/

use screenflow_core::{EVENT_EXIT, InputValues, Layout, State, Transition, Widget};

use super::{GO_TO_INITIAL, GO_TO_STATE_A};

/// Example screen B
pub struct StateB;

impl StateB {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StateB {
    fn default() -> Self {
        Self::new()
    }
}

impl State for StateB {
    fn name(&self) -> &str {
        "state_b"
    }

    fn layout(&self) -> Layout {
        Layout::new("State B")
            .row(vec![Widget::text("You are in State B.")])
            .row(vec![
                Widget::button("Go to State A", GO_TO_STATE_A),
                Widget::button("Go back to Initial", GO_TO_INITIAL),
                Widget::button("Exit", EVENT_EXIT),
            ])
    }

    fn transition(&mut self, event: &str, _values: &InputValues) -> Transition {
        match event {
            GO_TO_STATE_A => Transition::Goto("state_a".to_string()),
            GO_TO_INITIAL => Transition::Goto("initial".to_string()),
            _ => Transition::Stay,
        }
    }
}
