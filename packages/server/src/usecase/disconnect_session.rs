//! UseCase: セッション切断処理
//!
//! 読み取りループの終了と送信ループの終了のどちらからも呼ばれうるため、
//! 何度呼んでも安全（冪等）であることが前提です。

use std::sync::Arc;

use crate::domain::{Registry, SessionId};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Registry（メンバー表の抽象化）
    registry: Arc<dyn Registry>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// セッション切断を実行
    ///
    /// # Returns
    ///
    /// このセッションを実際にメンバー表から外した場合 `true`
    pub async fn execute(&self, session_id: SessionId) -> bool {
        self.registry.deregister(session_id).await
    }

    /// 残りのセッション数を取得
    pub async fn count_remaining_sessions(&self) -> usize {
        self.registry.count_members().await
    }
}
