//! UI layer: WebSocket/HTTP entry points and the frame dispatcher.

pub mod dispatcher;
mod handler;
mod server;
mod signal;
pub mod state;

pub use dispatcher::{DispatchOutcome, Dispatcher, DropReason};
pub use server::{Server, ServerError};
pub use signal::shutdown_signal;
