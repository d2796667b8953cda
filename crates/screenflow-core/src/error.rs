/*
[INPUT]:  Error sources (registry, backend, worker pool, event stream)
[OUTPUT]: Structured error types with classification helpers
[POS]:    Error handling layer - unified error types for the core crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the screenflow core
#[derive(Error, Debug)]
pub enum FlowError {
    /// A transition named a state that is not in the registry
    #[error("unknown state: {name}")]
    UnknownState { name: String },

    /// A state was registered under a name that is already taken
    #[error("duplicate state registration: {name}")]
    DuplicateState { name: String },

    /// A download transition fired but no task factory is configured
    #[error("no task factory configured for background transitions")]
    NoTaskFactory,

    /// The window backend failed to service a request
    #[error("backend error: {0}")]
    Backend(String),

    /// A worker thread could not be spawned
    #[error("worker thread error: {0}")]
    Worker(String),

    /// The event stream disconnected while the machine was still running
    #[error("event stream disconnected")]
    Disconnected,
}

impl FlowError {
    /// Create a backend error from any displayable failure
    pub fn backend(message: impl Into<String>) -> Self {
        FlowError::Backend(message.into())
    }

    /// Check whether the error indicates a wiring defect: the state registry
    /// and the transition tables disagree, or required collaborators are
    /// missing. These should fail fast rather than be retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FlowError::UnknownState { .. }
                | FlowError::DuplicateState { .. }
                | FlowError::NoTaskFactory
        )
    }
}

/// Result type alias for screenflow operations
pub type Result<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors() {
        let unknown = FlowError::UnknownState {
            name: "ghost".to_string(),
        };
        assert!(unknown.is_configuration());
        assert!(FlowError::NoTaskFactory.is_configuration());
        assert!(!FlowError::backend("poll failed").is_configuration());
        assert!(!FlowError::Disconnected.is_configuration());
    }

    #[test]
    fn test_error_display() {
        let err = FlowError::UnknownState {
            name: "state_z".to_string(),
        };
        assert_eq!(err.to_string(), "unknown state: state_z");

        let err = FlowError::backend("window vanished");
        assert_eq!(err.to_string(), "backend error: window vanished");
    }
}
