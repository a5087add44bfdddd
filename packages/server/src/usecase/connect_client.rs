//! UseCase: クライアント接続処理
//!
//! 接続しただけのクライアントはプレゼンスに含まれません。
//! ブロードキャストの宛先になるよう送信キューだけを登録します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録する
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::info!("Connection '{}' opened", connection_id);
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
    }
}
