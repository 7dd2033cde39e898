//! Repository trait definition
//!
//! The interface the use cases need for session bookkeeping. The concrete
//! implementation lives in the infrastructure layer (dependency inversion).

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, RoomId, RoomSummary, Session, SessionId};

/// Session Repository trait
///
/// Every method is one critical section: an implementation must make
/// `register`, `replace`, `remove`, `find` and `members_of` mutually exclusive,
/// and `members_of` returns a point-in-time snapshot.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Append a session for `connection`. Never deduplicates.
    async fn register(
        &self,
        connection: ConnectionId,
        room: RoomId,
        name: DisplayName,
    ) -> SessionId;

    /// Atomically drop the connection's sessions and register a new one.
    async fn replace(
        &self,
        connection: ConnectionId,
        room: RoomId,
        name: DisplayName,
    ) -> SessionId;

    /// First session of the connection, in registration order.
    async fn find(&self, connection: &ConnectionId) -> Option<Session>;

    /// Remove every session of the connection (idempotent).
    async fn remove(&self, connection: &ConnectionId) -> Vec<Session>;

    /// Snapshot of the sessions in a room, in registration order.
    async fn members_of(&self, room: &RoomId) -> Vec<Session>;

    /// Non-empty rooms with their member counts.
    async fn rooms(&self) -> Vec<RoomSummary>;

    /// Number of live sessions.
    async fn count_sessions(&self) -> usize;
}
