//! WebSocket envelope DTOs.
//!
//! Every frame is `{"type": <string>, "payload": {...}}`. Inbound frames are
//! decoded into [`ClientMessage`]; the only outbound frame is a chat
//! [`ServerMessage`] whose payload is the sender's payload, untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, value::RawValue};
use thiserror::Error;

/// Errors raised while decoding an inbound frame.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Not JSON, no string `type`, or `payload` is not an object
    #[error("Invalid envelope: {0}")]
    Decode(String),

    /// A field the message type requires is absent or not a string
    #[error("Payload of '{kind}' message requires string field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Chat,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Box<RawValue>>,
}

/// Payload of a `join` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPayload {
    pub room_id: String,
    /// `None` when absent or not a string
    pub name: Option<String>,
}

/// Payload of a `chat` message.
///
/// Holds the payload text exactly as received so it is forwarded byte-for-byte.
#[derive(Debug, Clone)]
pub struct ChatPayload {
    raw: Box<RawValue>,
}

impl PartialEq for ChatPayload {
    fn eq(&self, other: &Self) -> bool {
        self.raw.get() == other.raw.get()
    }
}

impl ChatPayload {
    /// Wrap the payload into the outbound chat envelope.
    pub fn into_server_message(self) -> ServerMessage {
        ServerMessage {
            r#type: MessageType::Chat,
            payload: self.raw,
        }
    }
}

/// Decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Join(JoinPayload),
    Chat(ChatPayload),
    /// Any other `type`; carried so it can be logged
    Unknown(String),
}

impl ClientMessage {
    /// Decode a text frame.
    pub fn parse(text: &str) -> Result<Self, EnvelopeError> {
        let raw: RawEnvelope =
            serde_json::from_str(text).map_err(|e| EnvelopeError::Decode(e.to_string()))?;
        let fields: Map<String, Value> = match &raw.payload {
            Some(payload) => serde_json::from_str(payload.get())
                .map_err(|e| EnvelopeError::Decode(e.to_string()))?,
            None => Map::new(),
        };

        match raw.kind.as_str() {
            "join" => {
                let room_id = required_str(&fields, "join", "roomId")?;
                let name = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Self::Join(JoinPayload { room_id, name }))
            }
            "chat" => {
                required_str(&fields, "chat", "message")?;
                required_str(&fields, "chat", "name")?;
                match raw.payload {
                    Some(raw) => Ok(Self::Chat(ChatPayload { raw })),
                    None => Err(EnvelopeError::MissingField {
                        kind: "chat",
                        field: "message",
                    }),
                }
            }
            _ => Ok(Self::Unknown(raw.kind)),
        }
    }
}

fn required_str(
    payload: &Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<String, EnvelopeError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(EnvelopeError::MissingField { kind, field })
}

/// Server → client frame.
#[derive(Debug, Clone, Serialize)]
pub struct ServerMessage {
    pub r#type: MessageType,
    pub payload: Box<RawValue>,
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
