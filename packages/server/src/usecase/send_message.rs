//! UseCase: メッセージ送信処理（ブロードキャスト）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者のルームの解決とブロードキャスト対象の選定
//!
//! ### なぜこのテストが必要か
//! - ルームの分離：別のルームの接続には配送されない
//! - 送信者自身にもエコーされる
//! - join 前の chat は配送されない
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じルームの全員（送信者を含む）へのブロードキャスト
//! - 異常系：join していない接続からの送信
//! - エッジケース：送信者のみがルームにいる場合

use std::sync::Arc;

use crate::domain::{BroadcastReport, ConnectionId, MessagePusher, RoomId, SessionRepository};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続
    /// * `json_message` - 送信する JSON メッセージ（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 配送結果（受信者ごとの失敗はここに数えられる）
    /// * `Err(SendMessageError::NotJoined)` - 送信元がどのルームにも参加していない
    pub async fn execute(
        &self,
        from: &ConnectionId,
        json_message: &str,
    ) -> Result<BroadcastReport, SendMessageError> {
        // 1. 送信者のルームを解決
        let sender = self
            .repository
            .find(from)
            .await
            .ok_or_else(|| SendMessageError::NotJoined(from.to_string()))?;

        // 2. ブロードキャスト対象を取得（送信者を含むルームの全員、スナップショット）
        let targets = self.get_broadcast_targets(&sender.room).await;
        tracing::debug!(
            "Broadcasting from '{}' ({}) to {} session(s) in room '{}'",
            from,
            sender.name,
            targets.len(),
            sender.room
        );

        // 3. MessagePusher を使ってブロードキャスト（Repository のロックは既に解放済み）
        Ok(self.message_pusher.broadcast(targets, json_message).await)
    }

    async fn get_broadcast_targets(&self, room: &RoomId) -> Vec<ConnectionId> {
        self.repository
            .members_of(room)
            .await
            .into_iter()
            .map(|session| session.connection)
            .collect()
    }
}
