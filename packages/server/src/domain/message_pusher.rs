//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信のインターフェース。
//! WebSocket などの具体的な送信手段は Infrastructure 層が実装します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RelayEvent};

/// Outbound queue of one connection (encoded frames).
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Registry of live connections and fan-out of relay events to them.
///
/// Every live connection is registered here, joined or not; the presence map
/// is tracked separately by the [`PresenceRepository`](super::PresenceRepository).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a live connection with its outbound queue
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Forget a connection
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// All live connections, ordered by id
    async fn connected_clients(&self) -> Vec<ConnectionId>;

    /// Push an event to a single connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError>;

    /// Push an event to every target. Individual delivery failures are
    /// tolerated; only an encoding failure is reported.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError>;
}
