//! Domain error types.

use thiserror::Error;

/// Failure to push a frame onto one connection's outbound queue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// The connection is not (or no longer) registered with the pusher
    #[error("Connection '{0}' is not registered")]
    ClientNotFound(String),

    /// The outbound queue was closed by the connection's writer task
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
