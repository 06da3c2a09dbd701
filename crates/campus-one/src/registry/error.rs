//! Error types for the identity registry.

use crate::replication::ReplicationError;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The login request was malformed (for example a seller without a
    /// shop, or an email registered under a different role).
    #[error("Login validation error: {0}")]
    Validation(String),

    /// The supplied password does not match the stored record.
    #[error("Credentials do not match the stored record")]
    CredentialMismatch,

    /// Password reset for an email nobody registered.
    #[error("No account registered for {0}")]
    UnknownEmail(String),

    /// A replication token could not be decoded; nothing was merged.
    #[error(transparent)]
    Replication(#[from] ReplicationError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for RegistryError {
    fn from(msg: String) -> Self {
        RegistryError::ActorCommunication(msg)
    }
}
