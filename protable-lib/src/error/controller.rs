//! Controller error types

/// Errors returned by controller and action-handle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// The controller was torn down; the operation had no effect.
    #[error("Table controller has been torn down")]
    TornDown,
}
