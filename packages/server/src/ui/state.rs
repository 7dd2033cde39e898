//! Shared application state.

use std::sync::Arc;

use crate::usecase::{ConnectParticipantUseCase, GetRoomDetailUseCase, GetRoomsUseCase};

use super::dispatcher::Dispatcher;

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// Dispatcher（受信フレームのルーティング）
    pub dispatcher: Arc<Dispatcher>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
