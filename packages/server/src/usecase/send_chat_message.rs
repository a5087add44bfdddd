//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatMessageUseCase::execute() メソッド
//! - 送信者の解決（SenderPolicy）と chatMessage のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者を含む全接続へ本文と色がそのまま届く
//! - 正常系（Bound）：クライアントが名乗った名前ではなく join 名が使われる
//! - 異常系（Bound）：未 join の接続からの送信は UnknownSender
//! - 正常系（Trusting）：未 join でも名乗った名前で中継される

use std::sync::Arc;

use crate::domain::{
    ChatMessage, Color, ConnectionId, MessagePusher, PresenceRepository, RelayError, RelayEvent,
    SenderPolicy,
};

use super::{broadcast_logged, resolve_sender};

/// チャットメッセージ送信のユースケース
pub struct SendChatMessageUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    policy: SenderPolicy,
}

impl SendChatMessageUseCase {
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

    /// メッセージを送信者を含む全接続へ中継する
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 中継したメッセージ
    /// * `Err(RelayError::UnknownSender)` - Bound ポリシーで未 join の接続から送信された
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        claimed_user: Option<String>,
        body: String,
        color: Option<Color>,
    ) -> Result<ChatMessage, RelayError> {
        let sender = resolve_sender(
            self.repository.as_ref(),
            self.policy,
            connection_id,
            claimed_user,
        )
        .await?;

        let message = ChatMessage {
            sender,
            body,
            color,
        };
        tracing::debug!(
            "Relaying chat message from '{}' ({} bytes)",
            message.sender,
            message.body.len()
        );

        let targets = self.message_pusher.connected_clients().await;
        broadcast_logged(
            self.message_pusher.as_ref(),
            targets,
            &RelayEvent::Chat(message.clone()),
        )
        .await;

        Ok(message)
    }
}
