//! Repository trait 定義
//!
//! ドメイン層が必要とするプレゼンス (接続 ID → 表示名) へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, Departure, DisplayName, Participant, PresenceSnapshot};

/// Presence Repository trait
///
/// The only way to read or mutate the presence map. Mutations (`join`,
/// `leave`) are issued by the relay dispatcher alone; the HTTP layer reads.
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 参加者を追加（同じ接続の既存エントリは置き換え）し、追加後のスナップショットを返す
    async fn join(&self, participant: Participant) -> PresenceSnapshot;

    /// 参加者を削除し、削除した名前と削除後のスナップショットを返す
    async fn leave(&self, connection_id: &ConnectionId) -> Departure;

    /// 接続の表示名を取得
    async fn name_of(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 参加者リストを取得（接続 ID 順）
    async fn get_participants(&self) -> Vec<Participant>;
}
