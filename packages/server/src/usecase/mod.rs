//! UseCase 層
//!
//! リレーの各操作（接続、join、チャット、ファイル通知、シグナリング、切断、
//! アップロード）をドメインの trait だけに依存して実装します。
//! 呼び出し順序の保証は UI 層のディスパッチャが担当します。

pub mod connect_client;
pub mod disconnect_participant;
pub mod get_presence;
pub mod join_chat;
pub mod notify_error;
pub mod relay_signal;
pub mod send_chat_message;
pub mod share_file;
pub mod upload_file;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use irori_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, PresenceRepository, RelayError, RelayEvent, SenderPolicy,
};

pub use connect_client::ConnectClientUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use get_presence::GetPresenceUseCase;
pub use join_chat::JoinChatUseCase;
pub use notify_error::NotifyErrorUseCase;
pub use relay_signal::RelaySignalUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use share_file::ShareFileUseCase;
pub use upload_file::UploadFileUseCase;

/// Every usecase driven by the relay dispatcher, wired to the same presence
/// store and pusher.
pub struct RelayUseCases {
    pub connect: ConnectClientUseCase,
    pub join: JoinChatUseCase,
    pub chat: SendChatMessageUseCase,
    pub share_file: ShareFileUseCase,
    pub signal: RelaySignalUseCase,
    pub disconnect: DisconnectParticipantUseCase,
    pub notify_error: NotifyErrorUseCase,
}

impl RelayUseCases {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        policy: SenderPolicy,
    ) -> Self {
        Self {
            connect: ConnectClientUseCase::new(message_pusher.clone()),
            join: JoinChatUseCase::new(repository.clone(), message_pusher.clone(), clock),
            chat: SendChatMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                policy,
            ),
            share_file: ShareFileUseCase::new(repository.clone(), message_pusher.clone(), policy),
            signal: RelaySignalUseCase::new(repository.clone(), message_pusher.clone(), policy),
            disconnect: DisconnectParticipantUseCase::new(repository, message_pusher.clone()),
            notify_error: NotifyErrorUseCase::new(message_pusher),
        }
    }
}

/// Resolve who sent an event arriving on `connection_id`.
async fn resolve_sender(
    repository: &dyn PresenceRepository,
    policy: SenderPolicy,
    connection_id: &ConnectionId,
    claimed: Option<String>,
) -> Result<String, RelayError> {
    let joined_name = repository.name_of(connection_id).await;
    policy.resolve(connection_id, joined_name, claimed)
}

/// Broadcast, logging a failure instead of returning it.
async fn broadcast_logged(
    message_pusher: &dyn MessagePusher,
    targets: Vec<ConnectionId>,
    event: &RelayEvent,
) {
    if let Err(e) = message_pusher.broadcast(targets, event).await {
        tracing::error!("Failed to broadcast event: {}", e);
    }
}
