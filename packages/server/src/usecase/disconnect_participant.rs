//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 送信キューの登録解除、プレゼンスからの削除、leaveChat のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：残っている全接続へ退出者の名前と更新後のプレゼンスが届く
//! - エッジケース：join 前に切断した接続は name が null で通知される
//! - エッジケース：最後の接続の切断（通知対象なし）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisconnectReason, DisplayName, MessagePusher, PresenceRepository, RelayEvent,
};

use super::broadcast_logged;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// 正常なクローズでも通信断でも同じ処理を行います。
    ///
    /// # Returns
    ///
    /// 退出した接続の表示名（join していなかった場合は `None`）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        reason: &DisconnectReason,
    ) -> Option<DisplayName> {
        self.message_pusher.unregister_client(connection_id).await;
        let departure = self.repository.leave(connection_id).await;

        match reason {
            DisconnectReason::Closed => tracing::info!(
                "Connection '{}' closed ({} present)",
                connection_id,
                departure.remaining.len()
            ),
            DisconnectReason::TransportDrop(cause) => tracing::warn!(
                "Connection '{}' dropped: {} ({} present)",
                connection_id,
                cause,
                departure.remaining.len()
            ),
        }

        let targets = self.message_pusher.connected_clients().await;
        let event = RelayEvent::Left {
            name: departure.name.clone(),
            users: departure.remaining,
        };
        broadcast_logged(self.message_pusher.as_ref(), targets, &event).await;

        departure.name
    }
}
