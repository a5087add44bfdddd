//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! Presence 集約をそのままストレージとして保持します。
//! プロセス内だけで完結し、再起動するとプレゼンスは空になります。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, DisplayName, Participant, Presence, PresenceRepository,
    PresenceSnapshot,
};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    presence: Arc<Mutex<Presence>>,
}

impl InMemoryPresenceRepository {
    pub fn new(presence: Arc<Mutex<Presence>>) -> Self {
        Self { presence }
    }
}

impl Default for InMemoryPresenceRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Presence::new())))
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn join(&self, participant: Participant) -> PresenceSnapshot {
        let mut presence = self.presence.lock().await;
        if let Some(previous) = presence.join(participant) {
            tracing::debug!(
                "Connection '{}' re-joined (was '{}')",
                previous.connection_id,
                previous.name
            );
        }
        presence.snapshot()
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Departure {
        let mut presence = self.presence.lock().await;
        presence.leave(connection_id)
    }

    async fn name_of(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let presence = self.presence.lock().await;
        presence.name_of(connection_id).cloned()
    }

    async fn get_participants(&self) -> Vec<Participant> {
        let presence = self.presence.lock().await;
        presence.participants()
    }
}

#[cfg(test)]
impl InMemoryPresenceRepository {
    pub(crate) async fn snapshot(&self) -> PresenceSnapshot {
        self.presence.lock().await.snapshot()
    }

    pub(crate) async fn count_participants(&self) -> usize {
        self.presence.lock().await.len()
    }
}
