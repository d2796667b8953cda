/*
[INPUT]:  Window events from the dispatch loop
[OUTPUT]: The four example screens and their event identifiers
[POS]:    State variants - one screen per submodule
[UPDATE]: When adding screens or event identifiers
*/

mod initial;
mod state_a;
mod state_b;
mod state_c;

pub use initial::InitialState;
pub use state_a::StateA;
pub use state_b::StateB;
pub use state_c::StateC;

use screenflow_core::State;

/// Event identifiers wired to the example buttons
pub const GO_TO_STATE_A: &str = "-go_to_state_a-";
pub const GO_TO_STATE_B: &str = "-go_to_state_b-";
pub const GO_TO_STATE_C: &str = "-go_to_state_c-";
pub const GO_TO_INITIAL: &str = "-go_to_initial-";
pub const DOWNLOAD: &str = "-download-";
pub const CLOSE_STATE_C: &str = "-close_state_c-";

/// Input key holding the download URL on the initial screen
pub const FILE_URL_KEY: &str = "file_url";

/// All example states, ready for registration
pub fn example_states() -> Vec<Box<dyn State>> {
    vec![
        Box::new(InitialState::new()),
        Box::new(StateA::new()),
        Box::new(StateB::new()),
        Box::new(StateC::new()),
    ]
}
