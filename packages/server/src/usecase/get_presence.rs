//! UseCase: 現在のプレゼンス取得

use std::sync::Arc;

use crate::domain::{Participant, PresenceRepository};

pub struct GetPresenceUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetPresenceUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// join 済みの参加者一覧（接続 ID 順）
    pub async fn execute(&self) -> Vec<Participant> {
        self.repository.get_participants().await
    }
}
