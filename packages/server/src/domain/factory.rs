//! Domain factories for creating value objects.

use super::SessionId;

/// Factory for generating SessionId instances.
///
/// Keeps id allocation out of the registry so that tests can build handles
/// with known ids.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a new SessionId with a random UUID v4.
    pub fn generate() -> SessionId {
        SessionId::from_uuid(uuid::Uuid::new_v4())
    }
}
