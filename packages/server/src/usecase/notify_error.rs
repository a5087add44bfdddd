//! UseCase: エラー通知
//!
//! 拒否したイベントの送信元にだけ error イベントを返します。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RelayError, RelayEvent};

/// エラー通知のユースケース
pub struct NotifyErrorUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotifyErrorUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(&self, connection_id: &ConnectionId, error: RelayError) {
        tracing::warn!(
            "Rejected event from '{}': {} ({})",
            connection_id,
            error,
            error.kind()
        );
        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, &RelayEvent::Rejected(error))
            .await
        {
            tracing::warn!("Could not notify '{}' of the error: {}", connection_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessagePushError, message_pusher::MockMessagePusher};
    use crate::usecase::test_support::{Fixture, assert_no_frame, id, next_frame};

    #[tokio::test]
    async fn test_error_goes_to_originator_only() {
        // テスト項目: error イベントは送信元にだけ届き、他の接続には届かない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx_a = fixture.connect("A").await;
        let mut rx_b = fixture.connect("B").await;
        let usecase = NotifyErrorUseCase::new(fixture.pusher.clone());

        // when (操作):
        usecase
            .execute(&id("A"), RelayError::MalformedEvent("missing field `message`".to_string()))
            .await;

        // then (期待する結果):
        let frame = next_frame(&mut rx_a);
        assert_eq!(frame["event"], "error");
        assert_eq!(frame["data"]["kind"], "malformedEvent");
        assert_no_frame(&mut rx_b);
    }

    #[tokio::test]
    async fn test_push_failure_is_swallowed() {
        // テスト項目: 送信元がすでに切断されていてもパニックしない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .times(1)
            .returning(|connection_id, _| {
                Err(MessagePushError::ClientNotFound(connection_id.to_string()))
            });
        let usecase = NotifyErrorUseCase::new(Arc::new(pusher));

        // when (操作) / then (期待する結果):
        usecase.execute(&id("gone"), RelayError::InvalidJoin).await;
    }
}
