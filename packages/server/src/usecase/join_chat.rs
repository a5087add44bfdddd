//! UseCase: チャット参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - 表示名の検証、プレゼンスへの登録、joinChat のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者本人を含む全接続へプレゼンス全体が届く
//! - 正常系：同じ接続での再 join は名前を置き換える
//! - 正常系：他の参加者と同じ表示名も受け付ける
//! - 正常系：空白のみの表示名もそのまま受け付ける
//! - 異常系：空の表示名は InvalidJoin

use std::sync::Arc;

use irori_shared::time::Clock;

use crate::domain::{
    Color, ConnectionId, DisplayName, MessagePusher, Participant, PresenceRepository,
    PresenceSnapshot, RelayError, RelayEvent, Timestamp,
};

use super::broadcast_logged;

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinChatUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// join を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - join する接続
    /// * `name` - クライアントが名乗った表示名（そのまま保持される）
    /// * `color` - 受け付けるが使用しない
    ///
    /// # Returns
    ///
    /// * `Ok(PresenceSnapshot)` - join 後のプレゼンス
    /// * `Err(RelayError::InvalidJoin)` - 表示名が空
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        name: String,
        color: Option<Color>,
    ) -> Result<PresenceSnapshot, RelayError> {
        let name = DisplayName::new(name).map_err(|_| RelayError::InvalidJoin)?;
        if let Some(color) = color {
            tracing::trace!("Ignoring join color {:?} from '{}'", color.as_str(), connection_id);
        }

        let joined_at = Timestamp::new(self.clock.now_millis());
        let users = self
            .repository
            .join(Participant::new(connection_id.clone(), name.clone(), joined_at))
            .await;
        tracing::info!(
            "Connection '{}' joined as '{}' ({} present)",
            connection_id,
            name,
            users.len()
        );

        let targets = self.message_pusher.connected_clients().await;
        let event = RelayEvent::Joined {
            name,
            users: users.clone(),
        };
        broadcast_logged(self.message_pusher.as_ref(), targets, &event).await;

        Ok(users)
    }
}
