//! UseCase: 接続受付処理
//!
//! 新しい接続に ConnectionId を払い出し、送信キューを MessagePusher に登録します。
//! この時点ではまだどのルームにも属しません（Unjoined）。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を受け付ける
    ///
    /// # Arguments
    ///
    /// * `sender` - 接続への送信キュー
    ///
    /// # Returns
    ///
    /// 新しく払い出した ConnectionId
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection = ConnectionId::generate();
        self.message_pusher
            .register_client(connection, sender)
            .await;
        connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::MockMessagePusher, infrastructure::message_pusher::WebSocketMessagePusher};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_sender_with_pusher() {
        // テスト項目: 接続時に送信キューが MessagePusher に登録される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_register_client()
            .times(1)
            .returning(|_, _| ());
        let usecase = ConnectParticipantUseCase::new(Arc::new(pusher));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let _connection = usecase.execute(tx).await;

        // then (期待する結果): MockMessagePusher の drop 時に times(1) が検証される
    }

    #[tokio::test]
    async fn test_connect_returns_routable_connection_id() {
        // テスト項目: 払い出された ConnectionId 宛てに配送できる
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectParticipantUseCase::new(pusher.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection = usecase.execute(tx).await;
        let report = pusher.broadcast(vec![connection], "hello").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 1);
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_connect_issues_distinct_ids() {
        // テスト項目: 接続ごとに異なる ConnectionId が払い出される
        // given (前提条件):
        let usecase = ConnectParticipantUseCase::new(Arc::new(WebSocketMessagePusher::new()));
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let a = usecase.execute(tx1).await;
        let b = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
