//! UseCase: ファイルアップロード
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UploadFileUseCase::execute() メソッド
//! - 保存名の生成（`<unix millis><.拡張子>`）と衝突時の連番付与
//!
//! ### どのような状況を想定しているか
//! - 正常系：元のファイル名の拡張子が保存名に引き継がれる
//! - エッジケース：同一ミリ秒のアップロードは `-1`, `-2` ... で区別される
//! - 異常系：保存に失敗した場合は UploadFailure
//!
//! アップロードはチャネルのイベントではないため、誰にも通知しません。

use std::sync::Arc;

use irori_shared::time::Clock;

use crate::domain::{FileStorage, RelayError, StorageError, StoredFileName, Timestamp};

/// 同一ミリ秒に衝突した場合に試す保存名の数
const MAX_NAME_ATTEMPTS: u32 = 16;

/// ファイルアップロードのユースケース
pub struct UploadFileUseCase {
    storage: Arc<dyn FileStorage>,
    clock: Arc<dyn Clock>,
}

impl UploadFileUseCase {
    pub fn new(storage: Arc<dyn FileStorage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// ファイルを保存し、生成した保存名を返す
    ///
    /// # Arguments
    ///
    /// * `original_name` - クライアントが送ったファイル名（拡張子だけを使う）
    /// * `bytes` - ファイルの中身
    pub async fn execute(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFileName, RelayError> {
        let uploaded_at = Timestamp::new(self.clock.now_millis());

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = StoredFileName::generate(uploaded_at, original_name, attempt);
            match self.storage.store(&name, bytes).await {
                Ok(()) => {
                    tracing::info!(
                        "Stored upload '{}' as '{}' ({} bytes)",
                        original_name,
                        name,
                        bytes.len()
                    );
                    return Ok(name);
                }
                Err(StorageError::AlreadyExists(taken)) => {
                    tracing::debug!("File name '{}' is taken, retrying", taken);
                }
                Err(StorageError::Io(e)) => {
                    tracing::error!("Failed to store upload '{}': {}", original_name, e);
                    return Err(RelayError::UploadFailure(e));
                }
            }
        }

        Err(RelayError::UploadFailure(format!(
            "no free file name after {} attempts",
            MAX_NAME_ATTEMPTS
        )))
    }
}
