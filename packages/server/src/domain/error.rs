//! Domain layer error definitions.

use thiserror::Error;

use super::Identity;

/// Outcomes of registry lookups that did not reach anyone.
///
/// The display strings are sent back to peers verbatim, so they are part of
/// the wire contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No live session carries the requested identity
    #[error("recipient not found: {0}")]
    RecipientNotFound(Identity),

    /// Nobody is connected
    #[error("empty clients")]
    EmptyRoster,

    /// The recipient's outbound queue is at capacity; the payload was dropped
    #[error("recipient queue full: {0}")]
    RecipientBacklogged(Identity),
}
