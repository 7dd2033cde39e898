//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RoomId, Session, SessionRepository};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// ルームのメンバー（登録順）を取得
    ///
    /// メンバーがいないルームは存在しないものとして扱う。
    pub async fn execute(&self, room: RoomId) -> Result<Vec<Session>, GetRoomDetailError> {
        let members = self.repository.members_of(&room).await;
        if members.is_empty() {
            return Err(GetRoomDetailError::RoomNotFound(room.into_string()));
        }
        Ok(members)
    }
}
