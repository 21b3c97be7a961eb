//! Core domain models for the relay.

use tokio::sync::mpsc;

use super::value_object::{Identity, SessionId, Timestamp};

/// Addressed unit placed on a session's outbound queue.
///
/// `to` carries the identity that asked for the delivery and `from` the
/// identity it was resolved to. Peers rely on this framing ("to you, X, from
/// Y"), so it must not be "corrected" to the naive direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub to: Identity,
    pub from: Identity,
    pub message: String,
}

impl Envelope {
    /// Build the envelope for `deliver(sender, recipient, message)`.
    pub fn addressed(sender: &Identity, recipient: &Identity, message: String) -> Self {
        Self {
            to: sender.clone(),
            from: recipient.clone(),
            message,
        }
    }
}

/// Decoded inbound request, before dispatch.
///
/// `from` is whatever the peer wrote in the frame. It is not checked
/// against the connection's own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub to: Identity,
    pub from: Identity,
    pub message: String,
}

impl InboundMessage {
    /// Whether this frame asks for the roster.
    pub fn is_roster_request(&self) -> bool {
        self.message == super::ROSTER_REQUEST
    }
}

/// What a session hands to the registry when it registers.
#[derive(Debug)]
pub struct SessionHandle {
    /// Membership key
    pub id: SessionId,
    /// Identity the peer declared on connect
    pub identity: Identity,
    /// Producer side of the session's bounded outbound queue
    pub sender: mpsc::Sender<Envelope>,
    /// When the session registered
    pub connected_at: Timestamp,
}

impl SessionHandle {
    pub fn new(id: SessionId, identity: Identity, sender: mpsc::Sender<Envelope>) -> Self {
        Self {
            id,
            identity,
            sender,
            connected_at: Timestamp::now(),
        }
    }
}

/// Read-only view of one registry member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub session_id: SessionId,
    pub identity: Identity,
    pub connected_at: Timestamp,
}
