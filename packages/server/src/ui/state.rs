//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetPresenceUseCase, UploadFileUseCase};

use super::dispatcher::RelayHandle;

/// State handed to every handler.
///
/// Channel events never touch the usecases directly; they go through the
/// relay handle so they are applied one at a time.
pub struct AppState {
    pub relay: RelayHandle,
    /// UploadFileUseCase（ファイルアップロードのユースケース）
    pub upload_file_usecase: Arc<UploadFileUseCase>,
    /// GetPresenceUseCase（プレゼンス取得のユースケース）
    pub get_presence_usecase: Arc<GetPresenceUseCase>,
}
