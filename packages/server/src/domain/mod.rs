//! Domain layer for the relay.
//!
//! Contains the session model and the interfaces (repository and message
//! pusher) the use cases depend on. Nothing here knows about WebSocket or JSON.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{BroadcastReport, RoomSummary, Session};
pub use error::MessagePushError;
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use registry::SessionRegistry;
pub use repository::SessionRepository;
pub use value_object::{ConnectionId, DisplayName, RoomId, SessionId, Timestamp};
