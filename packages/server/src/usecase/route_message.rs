//! UseCase: 受信メッセージの振り分け
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteMessageUseCase::execute() メソッド
//! - 名簿要求（"static"）と通常メッセージの振り分け
//!
//! ### なぜこのテストが必要か
//! - 名簿の返信先は「接続の Identity」ではなく「フレームに書かれた from」
//! - 転送は本文を加工せず、宛先が無ければ送信元へエラー文言を返す
//!
//! ### どのような状況を想定しているか
//! - 正常系：転送、名簿返信
//! - 異常系：宛先なし、キュー満杯、名簿が空
//!
//! Registry はモック（mockall）に差し替え、呼び出し内容だけを検証します。

use std::sync::Arc;

use crate::domain::{Envelope, Identity, InboundMessage, Registry, RegistryError, SessionId};

/// 振り分けの結果（ログとテスト用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// 宛先のキューに積んだ
    Forwarded { recipient: Identity },
    /// 名簿を `requester` 宛てに積んだ
    RosterReplied { requester: Identity },
    /// 転送できず、送信元へエラー文言を返した（返せたかは問わない）
    Rejected(RegistryError),
    /// 名簿の返信先が見つからず、破棄した
    Dropped(RegistryError),
}

/// メッセージ振り分けのユースケース
pub struct RouteMessageUseCase {
    /// Registry（メンバー表の抽象化）
    registry: Arc<dyn Registry>,
}

impl RouteMessageUseCase {
    /// 新しい RouteMessageUseCase を作成
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    /// 1 フレーム分の振り分けを実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - このフレームを受け取った接続の SessionId（エラー通知の返信先）
    /// * `connection` - このフレームを受け取った接続の Identity
    /// * `inbound` - デコード済みのフレーム
    pub async fn execute(
        &self,
        session_id: SessionId,
        connection: &Identity,
        inbound: InboundMessage,
    ) -> RouteOutcome {
        if inbound.is_roster_request() {
            self.reply_roster(connection, inbound.from).await
        } else {
            self.forward(session_id, connection, inbound.to, inbound.message)
                .await
        }
    }

    /// 名簿をカンマ区切りで `requester` 宛てに返す
    async fn reply_roster(&self, connection: &Identity, requester: Identity) -> RouteOutcome {
        let roster = match self.registry.list_identities().await {
            Ok(identities) => identities
                .iter()
                .map(Identity::as_str)
                .collect::<Vec<_>>()
                .join(","),
            Err(e) => e.to_string(),
        };

        match self.registry.deliver(connection, &requester, roster).await {
            Ok(()) => RouteOutcome::RosterReplied { requester },
            Err(e) => {
                tracing::warn!(
                    connection = %connection,
                    requester = %requester,
                    "Roster reply not delivered: {}",
                    e
                );
                RouteOutcome::Dropped(e)
            }
        }
    }

    /// 本文をそのまま `recipient` へ転送する
    async fn forward(
        &self,
        session_id: SessionId,
        connection: &Identity,
        recipient: Identity,
        message: String,
    ) -> RouteOutcome {
        match self.registry.deliver(connection, &recipient, message).await {
            Ok(()) => RouteOutcome::Forwarded { recipient },
            Err(e) => {
                tracing::info!(connection = %connection, "Message not delivered: {}", e);
                self.notify_sender(session_id, connection, &e).await;
                RouteOutcome::Rejected(e)
            }
        }
    }

    /// 失敗理由を接続自身へ返す
    ///
    /// 同じ Identity の接続が他にあっても、送信した接続そのものに届ける
    async fn notify_sender(
        &self,
        session_id: SessionId,
        connection: &Identity,
        error: &RegistryError,
    ) {
        let notice = Envelope::addressed(connection, connection, error.to_string());
        if let Err(e) = self.registry.deliver_to_session(session_id, notice).await {
            tracing::warn!(
                session_id = %session_id,
                connection = %connection,
                "Failed to report delivery error back to sender: {}",
                e
            );
        }
    }
}
