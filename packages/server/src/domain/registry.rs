//! Registry contract.
//!
//! The registry owns the set of live sessions and routes addressed messages
//! between them. Implementations must make every operation atomic with
//! respect to the others: a `deliver` never enqueues onto a session whose
//! queue a concurrent `deregister` has already closed.

use async_trait::async_trait;

use super::{Envelope, Identity, MemberSnapshot, RegistryError, SessionHandle, SessionId};

/// Payload value that asks for the roster instead of being forwarded.
pub const ROSTER_REQUEST: &str = "static";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Registry: Send + Sync {
    /// Add a session to the membership set.
    ///
    /// Registering an id that is already present overwrites the previous
    /// member; the previous member's queue is closed.
    async fn register(&self, handle: SessionHandle);

    /// Remove a session and close its outbound queue.
    ///
    /// Returns `false` when the session was not present, which is not an
    /// error: teardown paths may race each other.
    async fn deregister(&self, session_id: SessionId) -> bool;

    /// Enqueue `Envelope::addressed(sender, recipient, message)` on the first
    /// live session whose identity is `recipient`. Never waits for queue
    /// capacity or for the recipient to appear.
    async fn deliver(
        &self,
        sender: &Identity,
        recipient: &Identity,
        message: String,
    ) -> Result<(), RegistryError>;

    /// Enqueue `envelope` on exactly the session `session_id`, regardless of
    /// how many other sessions share its identity. Same non-waiting policy
    /// as `deliver`.
    async fn deliver_to_session(
        &self,
        session_id: SessionId,
        envelope: Envelope,
    ) -> Result<(), RegistryError>;

    /// Live identities in ascending order, or `RegistryError::EmptyRoster`.
    async fn list_identities(&self) -> Result<Vec<Identity>, RegistryError>;

    /// Snapshot of every live member, ordered by connection time.
    async fn members(&self) -> Vec<MemberSnapshot>;

    /// Number of live sessions.
    async fn count_members(&self) -> usize;
}

