//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`UnboundedSender`）を管理
//! - ブロードキャスト時の受信者ごとの失敗の隔離
//!
//! ## 設計ノート
//!
//! ソケットへの書き込みは UI 層の writer タスク（`ui/handler/websocket.rs`）が行います。
//! ここではキューに積むだけなので、遅い受信者が他の受信者への配送を止めることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BroadcastReport, ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のコネクションの送信キュー
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connections currently registered
    pub async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

fn push_one(
    clients: &HashMap<ConnectionId, PusherChannel>,
    target: &ConnectionId,
    content: &str,
) -> Result<(), MessagePushError> {
    let sender = clients
        .get(target)
        .ok_or_else(|| MessagePushError::ClientNotFound(target.to_string()))?;
    sender
        .send(content.to_string())
        .map_err(|e| MessagePushError::PushFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection);
    }

    async fn unregister_client(&self, connection: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection).is_some() {
            tracing::debug!("Connection '{}' unregistered from MessagePusher", connection);
        }
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> BroadcastReport {
        let clients = self.clients.lock().await;
        let mut report = BroadcastReport::default();

        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            match push_one(&clients, &target, content) {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::debug!("Broadcasted message to connection '{}'", target);
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!("Skipping connection '{}' during broadcast: {}", target, e);
                }
            }
        }

        report
    }
}
