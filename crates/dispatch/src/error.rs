//! Dispatch error types.

/// Errors that can occur while dispatching a round of queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// A stop was requested before all queries settled.
    #[error("dispatch abandoned: stop requested")]
    Stopped,
}
