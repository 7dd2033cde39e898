//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomSummary, SessionRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// メンバーが 1 人以上いるルームの一覧（ルーム ID 順）
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.repository.rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, DisplayName, RoomId},
        infrastructure::repository::InMemorySessionRepository,
    };

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: 誰もいなければ空のリストが返される
        // given (前提条件):
        let usecase = GetRoomsUseCase::new(Arc::new(InMemorySessionRepository::new()));

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_get_rooms_counts_members() {
        // テスト項目: ルームごとのメンバー数が返される
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::new());
        for room in ["12345", "12345", "99999"] {
            repository
                .register(ConnectionId::generate(), RoomId::new(room), DisplayName::anonymous())
                .await;
        }
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let counts: Vec<(&str, usize)> = rooms.iter().map(|r| (r.room.as_str(), r.members)).collect();
        assert_eq!(counts, vec![("12345", 2), ("99999", 1)]);
    }
}
