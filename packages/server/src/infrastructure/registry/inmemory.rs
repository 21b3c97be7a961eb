//! InMemory Registry 実装
//!
//! ドメイン層が定義する `Registry` trait の具体的な実装。
//! メンバー表（SessionId → Member）と Identity の索引を 1 つの `RwLock` で守ります。
//!
//! ## ロック規律
//!
//! - `register` / `deregister` は書き込みロックを取る
//! - `deliver` / `deliver_to_session` / `list_identities` / `members` は読み取りロックを取る
//! - `deliver` / `deliver_to_session` はロック保持中に待機しない（`try_send` のみ）
//!
//! メンバーを表から外すと、レジストリが持つ唯一の `Sender` が drop され、
//! セッションの送信キューが閉じます。読み取りロック下の `deliver` は、
//! 表に残っているメンバーにしか enqueue できないため、閉じたキューへの
//! enqueue は起こりません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc, mpsc::error::TrySendError};

use crate::domain::{
    Envelope, Identity, MemberSnapshot, Registry, RegistryError, SessionHandle, SessionId,
    Timestamp,
};

/// 表に載っている 1 セッション分の情報
struct Member {
    identity: Identity,
    sender: mpsc::Sender<Envelope>,
    connected_at: Timestamp,
}

impl Member {
    /// 待機せずにキューへ積む。満杯なら新しい方を捨てる
    fn enqueue(&self, envelope: Envelope) -> Result<(), RegistryError> {
        match self.sender.try_send(envelope) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(
                    recipient = %self.identity,
                    sender = %dropped.to,
                    "Outbound queue full; dropping message"
                );
                Err(RegistryError::RecipientBacklogged(self.identity.clone()))
            }
            Err(TrySendError::Closed(_)) => {
                // 送信ループが先に終わり、まだ deregister されていない
                tracing::debug!(recipient = %self.identity, "Outbound queue already drained");
                Err(RegistryError::RecipientNotFound(self.identity.clone()))
            }
        }
    }
}

/// ロックで守られるメンバー表と Identity 索引
#[derive(Default)]
struct Membership {
    /// SessionId → Member
    sessions: HashMap<SessionId, Member>,
    /// Identity → 登録順の SessionId 一覧（重複 Identity を許容する）
    by_identity: HashMap<Identity, Vec<SessionId>>,
}

impl Membership {
    /// 追加する。同じ SessionId が既にあれば上書きし、古いメンバーを返す
    fn insert(&mut self, handle: SessionHandle) -> Option<Member> {
        let previous = self.remove(handle.id);

        self.by_identity
            .entry(handle.identity.clone())
            .or_default()
            .push(handle.id);
        self.sessions.insert(
            handle.id,
            Member {
                identity: handle.identity,
                sender: handle.sender,
                connected_at: handle.connected_at,
            },
        );

        previous
    }

    /// 削除する。索引も同時に掃除する
    fn remove(&mut self, session_id: SessionId) -> Option<Member> {
        let member = self.sessions.remove(&session_id)?;

        if let Some(ids) = self.by_identity.get_mut(&member.identity) {
            ids.retain(|id| *id != session_id);
            if ids.is_empty() {
                self.by_identity.remove(&member.identity);
            }
        }

        Some(member)
    }

    /// Identity に一致する最初（最も早く登録された）のメンバー
    fn first_for(&self, identity: &Identity) -> Option<&Member> {
        self.by_identity
            .get(identity)?
            .iter()
            .find_map(|id| self.sessions.get(id))
    }
}

/// インメモリ Registry 実装
///
/// サーバープロセスごとに 1 つ作り、`Arc<dyn Registry>` として各接続タスクへ渡します。
/// テストでは独立したインスタンスをいくつでも作れます。
#[derive(Default)]
pub struct InMemoryRegistry {
    membership: RwLock<Membership>,
}

impl InMemoryRegistry {
    /// 空の InMemoryRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn register(&self, handle: SessionHandle) {
        let session_id = handle.id;
        let identity = handle.identity.clone();

        let previous = {
            let mut membership = self.membership.write().await;
            membership.insert(handle)
        };

        match previous {
            Some(old) => tracing::warn!(
                session_id = %session_id,
                identity = %identity,
                previous_identity = %old.identity,
                "Session re-registered; previous member replaced"
            ),
            None => tracing::debug!(
                session_id = %session_id,
                identity = %identity,
                "Session registered"
            ),
        }
    }

    async fn deregister(&self, session_id: SessionId) -> bool {
        // Member (と Sender) はロックの中で drop され、キューがここで閉じる
        let removed = {
            let mut membership = self.membership.write().await;
            membership.remove(session_id)
        };

        match removed {
            Some(member) => {
                tracing::debug!(
                    session_id = %session_id,
                    identity = %member.identity,
                    "Session deregistered"
                );
                true
            }
            None => {
                tracing::trace!(session_id = %session_id, "Session already deregistered");
                false
            }
        }
    }

    async fn deliver(
        &self,
        sender: &Identity,
        recipient: &Identity,
        message: String,
    ) -> Result<(), RegistryError> {
        let membership = self.membership.read().await;

        let Some(member) = membership.first_for(recipient) else {
            return Err(RegistryError::RecipientNotFound(recipient.clone()));
        };

        member.enqueue(Envelope::addressed(sender, recipient, message))
    }

    async fn deliver_to_session(
        &self,
        session_id: SessionId,
        envelope: Envelope,
    ) -> Result<(), RegistryError> {
        let membership = self.membership.read().await;

        let Some(member) = membership.sessions.get(&session_id) else {
            tracing::debug!(session_id = %session_id, "Session not registered; envelope dropped");
            return Err(RegistryError::RecipientNotFound(envelope.from));
        };

        member.enqueue(envelope)
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, RegistryError> {
        let membership = self.membership.read().await;

        let mut identities: Vec<Identity> = membership
            .sessions
            .values()
            .map(|member| member.identity.clone())
            .collect();

        if identities.is_empty() {
            return Err(RegistryError::EmptyRoster);
        }

        identities.sort();
        Ok(identities)
    }

    async fn members(&self) -> Vec<MemberSnapshot> {
        let membership = self.membership.read().await;

        let mut members: Vec<MemberSnapshot> = membership
            .sessions
            .iter()
            .map(|(session_id, member)| MemberSnapshot {
                session_id: *session_id,
                identity: member.identity.clone(),
                connected_at: member.connected_at,
            })
            .collect();

        members.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        members
    }

    async fn count_members(&self) -> usize {
        self.membership.read().await.sessions.len()
    }
}
