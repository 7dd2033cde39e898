//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! `SessionRegistry` 集約を 1 つの Mutex で保護し、全操作を相互排他にします。

use std::sync::Arc;

use async_trait::async_trait;
use heya_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, RoomId, RoomSummary, Session, SessionId, SessionRegistry,
    SessionRepository, Timestamp,
};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    /// Registry aggregate; the single shared mutable resource of the relay
    registry: Mutex<SessionRegistry>,
    /// Clock used to stamp `joined_at`
    clock: Arc<dyn Clock>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a repository that stamps sessions with the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: Mutex::new(SessionRegistry::new()),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(
        &self,
        connection: ConnectionId,
        room: RoomId,
        name: DisplayName,
    ) -> SessionId {
        let joined_at = self.now();
        let mut registry = self.registry.lock().await;
        registry.register(connection, room, name, joined_at)
    }

    async fn replace(
        &self,
        connection: ConnectionId,
        room: RoomId,
        name: DisplayName,
    ) -> SessionId {
        let joined_at = self.now();
        let mut registry = self.registry.lock().await;
        let (id, superseded) = registry.replace(connection, room, name, joined_at);
        for session in superseded {
            tracing::debug!(
                "Session {} of connection '{}' in room '{}' superseded by {}",
                session.id,
                connection,
                session.room,
                id
            );
        }
        id
    }

    async fn find(&self, connection: &ConnectionId) -> Option<Session> {
        let registry = self.registry.lock().await;
        registry.find(connection).cloned()
    }

    async fn remove(&self, connection: &ConnectionId) -> Vec<Session> {
        let mut registry = self.registry.lock().await;
        registry.remove(connection)
    }

    async fn members_of(&self, room: &RoomId) -> Vec<Session> {
        let registry = self.registry.lock().await;
        registry.members_of(room)
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let registry = self.registry.lock().await;
        registry.rooms()
    }

    async fn count_sessions(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.len()
    }
}
