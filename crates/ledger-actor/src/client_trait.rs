//! # LedgerFacade Trait
//!
//! Common interface for domain-specific client wrappers. A wrapper
//! exposes its ledger's commands as named methods with the ledger's own
//! error type; this trait supplies the shared `snapshot` plumbing so each
//! wrapper only writes what is specific to it.

use crate::{ActorError, LedgerClient, LedgerState};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`LedgerClient`].
///
/// Implementors provide access to the inner client and a mapping from
/// plumbing errors into the domain error type; `snapshot` comes for free.
#[async_trait]
pub trait LedgerFacade<S: LedgerState>: Send + Sync {
    /// The ledger-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &LedgerClient<S>;

    /// Map plumbing errors to the ledger error type.
    fn map_error(e: ActorError) -> Self::Error;

    /// Fetch the whole collection.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }
}
