//! UseCase: ファイル共有通知
//!
//! アップロード自体は HTTP で完了しています。ここではアップロード済みの
//! ファイル名を全接続へ知らせるだけで、ファイル名の中身は検証しません。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, FileNotice, MessagePusher, PresenceRepository, RelayError, RelayEvent,
    SenderPolicy,
};

use super::{broadcast_logged, resolve_sender};

/// ファイル共有通知のユースケース
pub struct ShareFileUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    policy: SenderPolicy,
}

impl ShareFileUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        policy: SenderPolicy,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            policy,
        }
    }

    /// fileUpload を送信者を含む全接続へ中継する
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        claimed_user: Option<String>,
        file_name: String,
    ) -> Result<FileNotice, RelayError> {
        let sender = resolve_sender(
            self.repository.as_ref(),
            self.policy,
            connection_id,
            claimed_user,
        )
        .await?;

        let notice = FileNotice { sender, file_name };
        tracing::info!("'{}' shared file '{}'", notice.sender, notice.file_name);

        let targets = self.message_pusher.connected_clients().await;
        broadcast_logged(
            self.message_pusher.as_ref(),
            targets,
            &RelayEvent::FileShared(notice.clone()),
        )
        .await;

        Ok(notice)
    }
}
