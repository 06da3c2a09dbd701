//! # Actor Errors
//!
//! Common error types for the actor plumbing. Ledger-specific errors are
//! carried boxed inside [`ActorError::Ledger`] and can be recovered with
//! [`ActorError::into_ledger`], so typed domain errors survive the trip
//! through the channel layer.

/// Errors that can occur in the actor plumbing itself.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Ledger error: {0}")]
    Ledger(Box<dyn std::error::Error + Send + Sync>),
}

impl ActorError {
    /// Recover the typed ledger error, if that is what this is.
    ///
    /// Returns the original error unchanged when it is a plumbing failure
    /// or a ledger error of a different type.
    pub fn into_ledger<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            ActorError::Ledger(inner) => inner
                .downcast::<E>()
                .map(|boxed| *boxed)
                .map_err(ActorError::Ledger),
            other => Err(other),
        }
    }
}
