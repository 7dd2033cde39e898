//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket envelopes
//! - `http`: HTTP API response DTOs

pub mod http;
pub mod websocket;
