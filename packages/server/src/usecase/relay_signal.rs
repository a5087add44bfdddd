//! UseCase: 通話シグナリングの中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelaySignalUseCase::start_call() / accept_call() メソッド
//! - シグナルが送信者以外の全接続に届き、送信者には戻らないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 接続のうち送信者以外の 2 接続に届く
//! - 正常系：シグナルの中身は解釈せずそのまま中継される
//! - エッジケース：送信者しか接続していない場合は誰にも届かない
//!
//! サーバーは通話の状態を持ちません。offer / answer の対応付けや
//! 宛先の選択はクライアント側の責務です。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PresenceRepository, RelayError, RelayEvent, SenderPolicy,
    SignalMessage, SignalPayload,
};

use super::{broadcast_logged, resolve_sender};

/// 通話シグナリング中継のユースケース
pub struct RelaySignalUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    policy: SenderPolicy,
}

impl RelaySignalUseCase {
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

    /// offer を incomingCall として中継する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 中継先（送信者を除く全接続）
    pub async fn start_call(
        &self,
        connection_id: &ConnectionId,
        claimed_user: Option<String>,
        signal: SignalPayload,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let message = self.signal_message(connection_id, claimed_user, signal).await?;
        tracing::info!("'{}' started a call", message.sender);
        Ok(self
            .relay(connection_id, RelayEvent::IncomingCall(message))
            .await)
    }

    /// answer を callAccepted として中継する
    pub async fn accept_call(
        &self,
        connection_id: &ConnectionId,
        claimed_user: Option<String>,
        signal: SignalPayload,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let message = self.signal_message(connection_id, claimed_user, signal).await?;
        tracing::info!("'{}' accepted a call", message.sender);
        Ok(self
            .relay(connection_id, RelayEvent::CallAccepted(message))
            .await)
    }

    async fn signal_message(
        &self,
        connection_id: &ConnectionId,
        claimed_user: Option<String>,
        signal: SignalPayload,
    ) -> Result<SignalMessage, RelayError> {
        let sender = resolve_sender(
            self.repository.as_ref(),
            self.policy,
            connection_id,
            claimed_user,
        )
        .await?;
        Ok(SignalMessage { sender, signal })
    }

    async fn relay(&self, origin: &ConnectionId, event: RelayEvent) -> Vec<ConnectionId> {
        let targets: Vec<ConnectionId> = self
            .message_pusher
            .connected_clients()
            .await
            .into_iter()
            .filter(|id| id != origin)
            .collect();
        broadcast_logged(self.message_pusher.as_ref(), targets.clone(), &event).await;
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Fixture, assert_no_frame, id, next_frame};
    use serde_json::json;

    async fn three_joined(fixture: &Fixture) {
        fixture.seed_join("A", "Alice").await;
        fixture.seed_join("B", "Bob").await;
        fixture.seed_join("C", "Carol").await;
    }

    fn usecase(fixture: &Fixture) -> RelaySignalUseCase {
        RelaySignalUseCase::new(
            fixture.repository.clone(),
            fixture.pusher.clone(),
            SenderPolicy::Bound,
        )
    }

    #[tokio::test]
    async fn test_start_call_reaches_everyone_but_caller() {
        // テスト項目: startCall が発信者以外の全接続に incomingCall として届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx_a = fixture.connect("A").await;
        let mut rx_b = fixture.connect("B").await;
        let mut rx_c = fixture.connect("C").await;
        three_joined(&fixture).await;
        let offer = json!({"type": "offer", "sdp": "v=0\r\no=- 1 2 IN IP4 0.0.0.0\r\n"});

        // when (操作):
        let targets = usecase(&fixture)
            .start_call(&id("A"), None, SignalPayload::new(offer.clone()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(targets, vec![id("B"), id("C")]);
        let expected = json!({
            "event": "incomingCall",
            "data": {"user": "Alice", "signal": offer}
        });
        assert_eq!(next_frame(&mut rx_b), expected);
        assert_eq!(next_frame(&mut rx_c), expected);
        assert_no_frame(&mut rx_a);
    }

    #[tokio::test]
    async fn test_accept_call_reaches_everyone_but_accepter() {
        // テスト項目: acceptCall が応答者以外の全接続に callAccepted として届く
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx_a = fixture.connect("A").await;
        let mut rx_b = fixture.connect("B").await;
        let mut rx_c = fixture.connect("C").await;
        three_joined(&fixture).await;
        let answer = json!({"type": "answer", "sdp": "v=0"});

        // when (操作):
        let targets = usecase(&fixture)
            .accept_call(&id("B"), None, SignalPayload::new(answer.clone()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(targets, vec![id("A"), id("C")]);
        assert_eq!(next_frame(&mut rx_a)["event"], "callAccepted");
        assert_eq!(next_frame(&mut rx_c)["data"]["signal"], answer);
        assert_no_frame(&mut rx_b);
    }

    #[tokio::test]
    async fn test_signal_with_single_connection_goes_nowhere() {
        // テスト項目: 発信者しか接続していない場合は中継先がない
        // given (前提条件):
        let fixture = Fixture::new();
        let mut rx_a = fixture.connect("A").await;
        fixture.seed_join("A", "Alice").await;

        // when (操作):
        let targets = usecase(&fixture)
            .start_call(&id("A"), None, SignalPayload::new(serde_json::Value::Null))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(targets.is_empty());
        assert_no_frame(&mut rx_a);
    }

    #[tokio::test]
    async fn test_signal_from_unjoined_connection_is_rejected() {
        // テスト項目: Bound では未 join の接続からのシグナルは中継されない
        // given (前提条件):
        let fixture = Fixture::new();
        let _rx_a = fixture.connect("A").await;
        let mut rx_b = fixture.connect("B").await;
        fixture.seed_join("B", "Bob").await;

        // when (操作):
        let result = usecase(&fixture)
            .start_call(&id("A"), None, SignalPayload::new(json!({})))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::UnknownSender(id("A"))));
        assert_no_frame(&mut rx_b);
    }
}
