//! Relay dispatcher.
//!
//! Every connection handler forwards what happens on its socket as a
//! [`RelayCommand`] into one unbounded queue. A single task drains the queue
//! and runs each command to completion before taking the next, so presence
//! updates and broadcasts are observed by every client in the same order.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, DisconnectReason, InboundEvent, PusherChannel, RelayError},
    usecase::RelayUseCases,
};

/// Commands sent by connection handlers to the relay dispatcher.
#[derive(Debug)]
pub enum RelayCommand {
    /// A socket was upgraded; `sender` is its outbound queue.
    Connect {
        connection_id: ConnectionId,
        sender: PusherChannel,
    },
    /// A well-formed event arrived.
    Event {
        connection_id: ConnectionId,
        event: InboundEvent,
    },
    /// A text frame that could not be decoded.
    Malformed {
        connection_id: ConnectionId,
        reason: String,
    },
    /// The socket ended, cleanly or not.
    Disconnect {
        connection_id: ConnectionId,
        reason: DisconnectReason,
    },
}

/// Cloneable handle for submitting commands to the dispatcher.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::UnboundedSender<RelayCommand>,
}

impl RelayHandle {
    /// Queue a command. Returns `false` if the dispatcher has stopped.
    pub fn send(&self, command: RelayCommand) -> bool {
        match self.tx.send(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Relay dispatcher is gone, dropping {:?}", e.0);
                false
            }
        }
    }
}

pub struct RelayDispatcher {
    usecases: Arc<RelayUseCases>,
}

impl RelayDispatcher {
    pub fn new(usecases: Arc<RelayUseCases>) -> Self {
        Self { usecases }
    }

    /// Start the dispatcher task.
    ///
    /// The task ends once every [`RelayHandle`] has been dropped.
    pub fn spawn(self) -> (RelayHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<RelayCommand>();
        let task = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                self.dispatch(command).await;
            }
            tracing::debug!("Relay dispatcher stopped");
        });
        (RelayHandle { tx }, task)
    }

    /// Run one command to completion.
    pub async fn dispatch(&self, command: RelayCommand) {
        match command {
            RelayCommand::Connect {
                connection_id,
                sender,
            } => self.usecases.connect.execute(connection_id, sender).await,
            RelayCommand::Event {
                connection_id,
                event,
            } => {
                tracing::debug!("'{}' sent {}", connection_id, event.name());
                if let Err(error) = self.handle_event(&connection_id, event).await {
                    self.usecases
                        .notify_error
                        .execute(&connection_id, error)
                        .await;
                }
            }
            RelayCommand::Malformed {
                connection_id,
                reason,
            } => {
                self.usecases
                    .notify_error
                    .execute(&connection_id, RelayError::MalformedEvent(reason))
                    .await;
            }
            RelayCommand::Disconnect {
                connection_id,
                reason,
            } => {
                self.usecases
                    .disconnect
                    .execute(&connection_id, &reason)
                    .await;
            }
        }
    }

    async fn handle_event(
        &self,
        connection_id: &ConnectionId,
        event: InboundEvent,
    ) -> Result<(), RelayError> {
        match event {
            InboundEvent::Join { name, color } => {
                self.usecases
                    .join
                    .execute(connection_id.clone(), name, color)
                    .await?;
            }
            InboundEvent::Chat {
                claimed_user,
                body,
                color,
            } => {
                self.usecases
                    .chat
                    .execute(connection_id, claimed_user, body, color)
                    .await?;
            }
            InboundEvent::FileShared {
                claimed_user,
                file_name,
            } => {
                self.usecases
                    .share_file
                    .execute(connection_id, claimed_user, file_name)
                    .await?;
            }
            InboundEvent::StartCall {
                claimed_user,
                signal,
            } => {
                self.usecases
                    .signal
                    .start_call(connection_id, claimed_user, signal)
                    .await?;
            }
            InboundEvent::AcceptCall {
                claimed_user,
                signal,
            } => {
                self.usecases
                    .signal
                    .accept_call(connection_id, claimed_user, signal)
                    .await?;
            }
        }
        Ok(())
    }
}
