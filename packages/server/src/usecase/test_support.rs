//! Fixtures shared by the usecase tests: a real in-memory presence store and
//! a real WebSocket pusher whose outbound queues the test reads directly.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{
    domain::{
        ConnectionId, DisplayName, MessagePusher, Participant, PresenceRepository, Timestamp,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
    },
};

pub fn id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub struct Fixture {
    pub repository: Arc<InMemoryPresenceRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryPresenceRepository::default()),
            pusher: Arc::new(WebSocketMessagePusher::default()),
        }
    }

    /// Register a live connection and hand back its outbound queue.
    pub async fn connect(&self, connection_id: &str) -> UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(id(connection_id), tx).await;
        rx
    }

    /// Put a connection into the presence map without broadcasting.
    pub async fn seed_join(&self, connection_id: &str, name: &str) {
        self.repository
            .join(Participant::new(
                id(connection_id),
                DisplayName::new(name.to_string()).unwrap(),
                Timestamp::new(0),
            ))
            .await;
    }
}

/// Next frame already queued for the connection, decoded.
pub fn next_frame(rx: &mut UnboundedReceiver<String>) -> serde_json::Value {
    let frame = rx.try_recv().expect("expected a queued frame");
    serde_json::from_str(&frame).unwrap()
}

pub fn assert_no_frame(rx: &mut UnboundedReceiver<String>) {
    assert!(rx.try_recv().is_err(), "unexpected queued frame");
}
