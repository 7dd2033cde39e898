//! In-memory session registry aggregate.
//!
//! Sessions are stored in an ordered map keyed by [`SessionId`], which is
//! assigned from a monotonically increasing counter, so iterating a set of ids
//! yields sessions in registration order. Two secondary indexes (room and
//! connection) point back into that map and are updated by every mutation.
//!
//! The aggregate itself is not synchronized; callers keep it behind a single
//! lock (see `InMemorySessionRepository`).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{
    entity::{RoomSummary, Session},
    value_object::{ConnectionId, DisplayName, RoomId, SessionId, Timestamp},
};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    next_id: u64,
    sessions: BTreeMap<SessionId, Session>,
    by_room: HashMap<RoomId, BTreeSet<SessionId>>,
    by_connection: HashMap<ConnectionId, BTreeSet<SessionId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new session. Always succeeds, even if the connection already
    /// holds sessions.
    pub fn register(
        &mut self,
        connection: ConnectionId,
        room: RoomId,
        name: DisplayName,
        joined_at: Timestamp,
    ) -> SessionId {
        let id = SessionId::new(self.next_id);
        self.next_id += 1;

        self.by_room.entry(room.clone()).or_default().insert(id);
        self.by_connection.entry(connection).or_default().insert(id);
        self.sessions.insert(
            id,
            Session {
                id,
                connection,
                room,
                name,
                joined_at,
            },
        );

        id
    }

    /// Drop every session of `connection`, then register a new one.
    ///
    /// Returns the new id and the sessions that were superseded.
    pub fn replace(
        &mut self,
        connection: ConnectionId,
        room: RoomId,
        name: DisplayName,
        joined_at: Timestamp,
    ) -> (SessionId, Vec<Session>) {
        let superseded = self.remove(&connection);
        let id = self.register(connection, room, name, joined_at);
        (id, superseded)
    }

    /// First session (in registration order) bound to `connection`.
    pub fn find(&self, connection: &ConnectionId) -> Option<&Session> {
        self.by_connection
            .get(connection)
            .and_then(|ids| ids.first())
            .and_then(|id| self.sessions.get(id))
    }

    /// Remove all sessions bound to `connection` and return them.
    ///
    /// Removing an unknown connection is a no-op returning an empty vec.
    pub fn remove(&mut self, connection: &ConnectionId) -> Vec<Session> {
        let Some(ids) = self.by_connection.remove(connection) else {
            return Vec::new();
        };

        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(session) = self.sessions.remove(&id) else {
                continue;
            };
            if let Some(members) = self.by_room.get_mut(&session.room) {
                members.remove(&id);
                if members.is_empty() {
                    self.by_room.remove(&session.room);
                }
            }
            removed.push(session);
        }

        removed
    }

    /// Snapshot of the sessions in `room`, in registration order.
    pub fn members_of(&self, room: &RoomId) -> Vec<Session> {
        self.by_room
            .get(room)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.sessions.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every non-empty room with its member count, sorted by room id.
    pub fn rooms(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self
            .by_room
            .iter()
            .map(|(room, ids)| RoomSummary {
                room: room.clone(),
                members: ids.len(),
            })
            .collect();
        rooms.sort_by(|a, b| a.room.cmp(&b.room));
        rooms
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
