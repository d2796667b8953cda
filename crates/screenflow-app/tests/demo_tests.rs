/*
[INPUT]:  The example app wired end to end over the headless backend
[OUTPUT]: Test results for the scripted demo tour
[POS]:    Integration tests - full application flow
[UPDATE]: When the demo tour changes
*/

use std::time::Duration;

use screenflow_app::script::{ScriptStep, spawn_driver};
use screenflow_app::states::{
    CLOSE_STATE_C,
    DOWNLOAD,
    FILE_URL_KEY,
    GO_TO_INITIAL,
    GO_TO_STATE_A,
    GO_TO_STATE_B,
    GO_TO_STATE_C,
    example_states,
};
use screenflow_app::tasks::DownloadTaskFactory;
use screenflow_core::{
    EVENT_EXIT,
    HeadlessBackend,
    InputValues,
    MachineConfig,
    StateMachine,
    WindowOp,
};

#[test]
fn scripted_tour_drives_the_full_demo() {
    let (backend, handle) = HeadlessBackend::new();
    let config = MachineConfig {
        poll_interval: Duration::from_millis(10),
        workers: 1,
    };
    let mut machine = StateMachine::new(Box::new(backend), config);
    for state in example_states() {
        machine.register_state(state).expect("register state");
    }
    machine.set_task_factory(Box::new(DownloadTaskFactory::new(Duration::from_millis(1))));

    // the default tour, compressed for test pacing
    let steps = vec![
        ScriptStep::new("initial", GO_TO_STATE_A).after_ms(10),
        ScriptStep::new("state_a", GO_TO_STATE_B).after_ms(10),
        ScriptStep::new("state_b", GO_TO_INITIAL).after_ms(10),
        ScriptStep::new("initial", GO_TO_STATE_C).after_ms(10),
        ScriptStep::new("state_c", CLOSE_STATE_C).after_ms(10),
        ScriptStep::new("initial", DOWNLOAD)
            .with_values(InputValues::new().with(FILE_URL_KEY, "https://example.com/f.bin"))
            .after_ms(10),
        ScriptStep::new("initial", EVENT_EXIT).after_ms(100),
    ];
    let driver = spawn_driver(handle.clone(), steps);

    machine.run("initial").expect("machine run");
    driver.join().expect("driver thread");

    assert_eq!(machine.primary(), "initial");
    assert!(machine.secondaries().is_empty());

    let ops = handle.ops();
    for name in ["initial", "state_a", "state_b", "state_c"] {
        assert!(
            ops.contains(&WindowOp::Opened {
                name: name.to_string()
            }),
            "window for {name} never opened"
        );
    }
    assert!(ops.contains(&WindowOp::Closed {
        name: "state_c".to_string()
    }));
    // every window is gone once the machine has stopped
    assert!(handle.open_windows().is_empty());
}
