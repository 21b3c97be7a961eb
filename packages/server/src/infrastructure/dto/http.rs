//! HTTP API response DTOs for the relay.

use serde::{Deserialize, Serialize};

use crate::domain::MemberSnapshot;

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// One live session in the roster endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntryDto {
    pub identity: String,
    pub session_id: String,
    pub connected_at: String, // ISO 8601
}

impl From<MemberSnapshot> for RosterEntryDto {
    fn from(member: MemberSnapshot) -> Self {
        Self {
            identity: member.identity.into_string(),
            session_id: member.session_id.to_string(),
            connected_at: kotozute_shared::time::timestamp_to_jst_rfc3339(
                member.connected_at.value(),
            ),
        }
    }
}
