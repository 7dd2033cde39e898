//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 同じ接続からの 2 回目以降の join の扱い（JoinPolicy）
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回の join
//! - Replace：2 回目の join で以前のセッションが置き換わる
//! - Append：2 回目の join でセッションが追加される

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, RoomId, SessionId, SessionRepository};

/// How a `join` on a connection that already holds a session is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// The new join supersedes every previous session of the connection
    #[default]
    Replace,
    /// Every join adds a session; a connection joined twice to one room
    /// receives each chat twice
    Append,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    policy: JoinPolicy,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>, policy: JoinPolicy) -> Self {
        Self { repository, policy }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection` - 参加する接続
    /// * `room` - 参加先のルーム
    /// * `name` - 表示名（未指定なら Anonymous）
    pub async fn execute(
        &self,
        connection: ConnectionId,
        room: RoomId,
        name: DisplayName,
    ) -> SessionId {
        match self.policy {
            JoinPolicy::Replace => self.repository.replace(connection, room, name).await,
            JoinPolicy::Append => self.repository.register(connection, room, name).await,
        }
    }
}
