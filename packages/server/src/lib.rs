//! Room-scoped WebSocket chat relay.
//!
//! Participants join a room over a WebSocket and every chat message sent in
//! that room is relayed to all of its members, the sender included.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
