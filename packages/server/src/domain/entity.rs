//! Domain entities.

use super::value_object::{ConnectionId, DisplayName, RoomId, SessionId, Timestamp};

/// One connected, joined participant: binds a connection to a room and a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub connection: ConnectionId,
    pub room: RoomId,
    pub name: DisplayName,
    /// When the session was registered
    pub joined_at: Timestamp,
}

/// A non-empty room and how many sessions it currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: RoomId,
    pub members: usize,
}

/// Result of one fan-out.
///
/// `failed` counts recipients whose outbound queue was closed or unknown;
/// they never prevent delivery to the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

impl BroadcastReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}
