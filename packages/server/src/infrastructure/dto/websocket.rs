//! WebSocket message DTOs for the relay.

use serde::{Deserialize, Serialize};

use crate::domain::{Envelope, Identity, InboundMessage};

/// The only frame shape on the wire, in both directions.
///
/// Missing fields decode as empty strings, so `{"to":"B","message":"hi"}`
/// is a valid request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireMessage {
    pub to: String,
    pub from: String,
    pub message: String,
}

impl WireMessage {
    /// Decode one text or binary frame payload.
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Encode for a text frame.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<WireMessage> for InboundMessage {
    fn from(wire: WireMessage) -> Self {
        Self {
            to: Identity::from(wire.to),
            from: Identity::from(wire.from),
            message: wire.message,
        }
    }
}

impl From<Envelope> for WireMessage {
    fn from(envelope: Envelope) -> Self {
        Self {
            to: envelope.to.into_string(),
            from: envelope.from.into_string(),
            message: envelope.message,
        }
    }
}
