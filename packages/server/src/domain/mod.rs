//! Domain layer for the relay.
//!
//! Holds the value objects, the envelope that travels between sessions and
//! the `Registry` contract. Nothing here knows about axum or JSON.

pub mod entity;
pub mod error;
pub mod factory;
pub mod registry;
pub mod value_object;

pub use entity::{Envelope, InboundMessage, MemberSnapshot, SessionHandle};
pub use error::RegistryError;
pub use factory::SessionIdFactory;
pub use registry::{ROSTER_REQUEST, Registry};
pub use value_object::{Identity, SessionId, Timestamp};

#[cfg(test)]
pub use registry::MockRegistry;
