/*
[INPUT]:  Public API exports for the screenflow example application
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod script;
pub mod states;
pub mod tasks;

// Re-export main types for convenience
pub use config::AppConfig;
pub use script::ScriptStep;
pub use states::example_states;
pub use tasks::{DownloadTask, DownloadTaskFactory};
