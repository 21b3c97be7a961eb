//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - SessionId の払い出し、送信キューの作成、Registry への登録
//!
//! ### なぜこのテストが必要か
//! - 登録直後から deliver でこのセッションへ届くことを保証する
//! - キュー容量が設定どおりであることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規セッションの登録
//! - エッジケース：同じ Identity での複数接続（拒否しない）

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{Envelope, Identity, Registry, SessionHandle, SessionId, SessionIdFactory};

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Registry（メンバー表の抽象化）
    registry: Arc<dyn Registry>,
    /// セッションごとの送信キュー容量
    outbound_capacity: usize,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    ///
    /// `outbound_capacity` が 0 の場合は 1 として扱う（tokio の mpsc は 0 を受け付けない）
    pub fn new(registry: Arc<dyn Registry>, outbound_capacity: usize) -> Self {
        Self {
            registry,
            outbound_capacity: outbound_capacity.max(1),
        }
    }

    /// セッション接続を実行
    ///
    /// # Returns
    ///
    /// 払い出した SessionId と、送信ループが読み出すキューの受信側
    pub async fn execute(&self, identity: Identity) -> (SessionId, mpsc::Receiver<Envelope>) {
        let session_id = SessionIdFactory::generate();
        let (sender, receiver) = mpsc::channel(self.outbound_capacity);

        self.registry
            .register(SessionHandle::new(session_id, identity, sender))
            .await;

        (session_id, receiver)
    }
}
