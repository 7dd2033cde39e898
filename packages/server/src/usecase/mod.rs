//! UseCase layer: application operations of the relay.

mod connect_participant;
mod disconnect_participant;
pub mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{GetRoomDetailError, SendMessageError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinPolicy, JoinRoomUseCase};
pub use send_message::SendMessageUseCase;
