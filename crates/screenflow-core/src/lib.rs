/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public screenflow core crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod backend;
pub mod error;
pub mod event;
pub mod layout;
pub mod machine;
pub mod state;
pub mod task;

// Re-export the GUI boundary
pub use backend::{HeadlessBackend, HeadlessHandle, WindowBackend, WindowId, WindowOp};

// Re-export the event model
pub use event::{
    EVENT_EXIT,
    EVENT_PROGRESS,
    EVENT_WINDOW_CLOSED,
    InputValues,
    PROGRESS_KEY,
    ProgressUpdate,
    WindowEvent,
};

// Re-export errors, layout, and the machine
pub use error::{FlowError, Result};
pub use layout::{Layout, Widget};
pub use machine::{MachineConfig, StateMachine};
pub use state::{State, Transition};

// Re-export the task layer
pub use task::{ProgressSender, Task, TaskFactory, WorkerPool};
