/*
[INPUT]:  Button events
[OUTPUT]: State A transitions
[POS]:    State variant - example screen A
[UPDATE]: When buttons change
*/

use screenflow_core::{EVENT_EXIT, InputValues, Layout, State, Transition, Widget};

use super::{GO_TO_INITIAL, GO_TO_STATE_B};

/// Example screen A
pub struct StateA;

impl StateA {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StateA {
    fn default() -> Self {
        Self::new()
    }
}

impl State for StateA {
    fn name(&self) -> &str {
        "state_a"
    }

    fn layout(&self) -> Layout {
        Layout::new("State A")
            .row(vec![Widget::text("You are in State A.")])
            .row(vec![
                Widget::button("Go to State B", GO_TO_STATE_B),
                Widget::button("Go back to Initial", GO_TO_INITIAL),
                Widget::button("Exit", EVENT_EXIT),
            ])
    }

    fn transition(&mut self, event: &str, _values: &InputValues) -> Transition {
        match event {
            GO_TO_STATE_B => Transition::Goto("state_b".to_string()),
            GO_TO_INITIAL => Transition::Goto("initial".to_string()),
            _ => Transition::Stay,
        }
    }
}
