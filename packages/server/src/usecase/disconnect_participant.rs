//! UseCase: 切断処理
//!
//! トランスポートから接続のクローズが通知されたときに呼ばれます。
//! 接続のセッションを全て削除し、送信キューの登録を解除します。冪等です。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Session, SessionRepository};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 削除されたセッション（未参加の接続や 2 回目の呼び出しでは空）
    pub async fn execute(&self, connection: &ConnectionId) -> Vec<Session> {
        let removed = self.repository.remove(connection).await;
        self.message_pusher.unregister_client(connection).await;
        removed
    }
}
