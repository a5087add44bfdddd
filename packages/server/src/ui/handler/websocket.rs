//! WebSocket connection handlers.
//!
//! Each socket gets a fresh connection id. Inbound frames are decoded here
//! and forwarded to the relay dispatcher; outbound frames arrive on the
//! connection's queue and are written by a dedicated task.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, DisconnectReason},
    infrastructure::dto::websocket::ClientEvent,
    ui::{
        dispatcher::{RelayCommand, RelayHandle},
        state::AppState,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's queue into the WebSocket.
///
/// The task ends when the queue is closed (the connection was unregistered)
/// or when writing to the socket fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Spawns a task that decodes inbound frames and forwards them to the relay.
///
/// Resolves to the reason the socket ended.
fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    connection_id: ConnectionId,
    relay: RelayHandle,
) -> JoinHandle<DisconnectReason> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    return DisconnectReason::TransportDrop(e.to_string());
                }
            };

            match msg {
                Message::Text(text) => {
                    let command = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(event) => RelayCommand::Event {
                            connection_id: connection_id.clone(),
                            event: event.into(),
                        },
                        Err(e) => {
                            tracing::warn!(
                                "Malformed frame from '{}': {} ({} bytes)",
                                connection_id,
                                e,
                                text.len()
                            );
                            RelayCommand::Malformed {
                                connection_id: connection_id.clone(),
                                reason: e.to_string(),
                            }
                        }
                    };
                    if !relay.send(command) {
                        return DisconnectReason::Closed;
                    }
                }
                Message::Binary(bytes) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from '{}'",
                        bytes.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::debug!("Client '{}' requested close", connection_id);
                    return DisconnectReason::Closed;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
        DisconnectReason::TransportDrop("stream ended without a close frame".to_string())
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    if !state.relay.send(RelayCommand::Connect {
        connection_id: connection_id.clone(),
        sender: tx,
    }) {
        return;
    }

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receiver_loop(receiver, connection_id.clone(), state.relay.clone());

    // If any one of the tasks completes, abort the other
    let reason = tokio::select! {
        joined = &mut recv_task => {
            send_task.abort();
            joined.unwrap_or_else(|e| DisconnectReason::TransportDrop(e.to_string()))
        }
        _ = &mut send_task => {
            recv_task.abort();
            DisconnectReason::TransportDrop("failed to write to socket".to_string())
        }
    };

    state.relay.send(RelayCommand::Disconnect {
        connection_id,
        reason,
    });
}
