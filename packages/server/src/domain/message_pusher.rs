//! MessagePusher trait definition
//!
//! Abstraction over "send these bytes to that connection". The UI layer owns
//! the sockets; the pusher only holds the sending half of each connection's
//! outbound queue.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{BroadcastReport, ConnectionId};

/// Sending half of a connection's outbound queue.
///
/// Unbounded, so pushing never waits on a slow recipient.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Start routing frames for `connection` into `sender`.
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// Stop routing frames for `connection`. Unknown connections are ignored.
    async fn unregister_client(&self, connection: &ConnectionId);

    /// Push `content` to every target.
    ///
    /// A failure for one target is logged and counted, never propagated, and
    /// does not stop delivery to the remaining targets.
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> BroadcastReport;
}
