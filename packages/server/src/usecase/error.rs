//! UseCase error types.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    /// Chat arrived on a connection that never joined a room
    #[error("Connection '{0}' has not joined a room")]
    NotJoined(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("Room '{0}' has no members")]
    RoomNotFound(String),
}
