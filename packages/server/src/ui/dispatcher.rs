//! Inbound frame dispatcher.
//!
//! Decodes each text frame of a connection and routes it to the matching use
//! case. Nothing here can fail the connection: every rejected frame is logged
//! and dropped, and the caller keeps reading.

use std::sync::Arc;

use crate::{
    domain::{BroadcastReport, ConnectionId, DisplayName, RoomId, SessionId},
    infrastructure::dto::websocket::{ClientMessage, EnvelopeError},
    usecase::{
        DisconnectParticipantUseCase, JoinRoomUseCase, SendMessageError, SendMessageUseCase,
    },
};

/// What happened to one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A `join` registered a session
    Joined(SessionId),
    /// A `chat` was fanned out to the sender's room
    Broadcast(BroadcastReport),
    /// The frame was rejected
    Dropped(DropReason),
    /// Well-formed frame of a type the relay does not handle
    Ignored(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    Malformed(EnvelopeError),
    NotJoined,
    Encode(String),
}

pub struct Dispatcher {
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}

impl Dispatcher {
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            send_message_usecase,
            disconnect_participant_usecase,
        }
    }

    /// Handle one text frame received on `connection`.
    pub async fn dispatch(&self, connection: &ConnectionId, text: &str) -> DispatchOutcome {
        let message = match ClientMessage::parse(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Dropping frame from '{}': {}", connection, e);
                return DispatchOutcome::Dropped(DropReason::Malformed(e));
            }
        };

        match message {
            ClientMessage::Join(payload) => {
                let room = RoomId::new(payload.room_id);
                let name = DisplayName::new(payload.name);
                tracing::info!(
                    "Connection '{}' joins room '{}' as '{}'",
                    connection,
                    room,
                    name
                );
                let id = self
                    .join_room_usecase
                    .execute(*connection, room, name)
                    .await;
                DispatchOutcome::Joined(id)
            }
            ClientMessage::Chat(payload) => {
                let json = match payload.into_server_message().to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::warn!("Failed to encode chat from '{}': {}", connection, e);
                        return DispatchOutcome::Dropped(DropReason::Encode(e.to_string()));
                    }
                };
                match self.send_message_usecase.execute(connection, &json).await {
                    Ok(report) => {
                        if report.failed > 0 {
                            tracing::warn!(
                                "Chat from '{}' reached {} of {} recipient(s)",
                                connection,
                                report.delivered,
                                report.attempted()
                            );
                        }
                        DispatchOutcome::Broadcast(report)
                    }
                    Err(SendMessageError::NotJoined(_)) => {
                        tracing::debug!("Dropping chat from unjoined connection '{}'", connection);
                        DispatchOutcome::Dropped(DropReason::NotJoined)
                    }
                }
            }
            ClientMessage::Unknown(kind) => {
                tracing::debug!("Ignoring '{}' frame from '{}'", kind, connection);
                DispatchOutcome::Ignored(kind)
            }
        }
    }

    /// Handle transport closure of `connection`. Idempotent.
    ///
    /// Returns how many sessions were removed.
    pub async fn close(&self, connection: &ConnectionId) -> usize {
        let removed = self.disconnect_participant_usecase.execute(connection).await;
        for session in &removed {
            tracing::info!(
                "Session {} ('{}') left room '{}'",
                session.id,
                session.name,
                session.room
            );
        }
        removed.len()
    }
}
