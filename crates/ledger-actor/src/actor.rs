//! # Ledger Actor
//!
//! This module defines the `LedgerActor`, the owning side of a ledger. It
//! holds the collection state and the receiver end of the command
//! channel, and it is the only code that ever mutates or persists the
//! collection.
//!
//! **Concurrency model**: each actor runs in its own Tokio task and
//! processes commands one at a time. The read-compute-write cycle of a
//! command, including the persistence flush, completes before the next
//! command is received, so a periodic pass and a user-initiated mutation
//! can never interleave on stale state. No `Mutex`, no `RwLock`.

use crate::client::LedgerClient;
use crate::error::ActorError;
use crate::message::LedgerRequest;
use crate::state::LedgerState;
use crate::store::{persist_collection, BlobStore};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns one ledger.
///
/// Constructed in one of two flavors:
///
/// * [`LedgerActor::persistent`] - the collection is flushed to the given
///   blob store under [`LedgerState::COLLECTION`] after every mutating
///   command. Flush failures are logged and swallowed; the in-memory
///   state stays authoritative.
/// * [`LedgerActor::ephemeral`] - no store, nothing is ever written. Used
///   for session-scoped ledgers such as a dispatch log.
///
/// # Usage Pattern
///
/// 1. **Create**: call a constructor to get the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(ctx)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// The actor exits its loop when every client clone has been dropped.
pub struct LedgerActor<S: LedgerState> {
    receiver: mpsc::Receiver<LedgerRequest<S>>,
    state: S,
    store: Option<Arc<dyn BlobStore>>,
}

impl<S: LedgerState> LedgerActor<S> {
    /// Creates an actor whose ledger is flushed to `store` after every
    /// mutating command.
    pub fn persistent(
        buffer_size: usize,
        state: S,
        store: Arc<dyn BlobStore>,
    ) -> (Self, LedgerClient<S>) {
        Self::with_store(buffer_size, state, Some(store))
    }

    /// Creates an actor whose ledger lives only in memory.
    pub fn ephemeral(buffer_size: usize, state: S) -> (Self, LedgerClient<S>) {
        Self::with_store(buffer_size, state, None)
    }

    fn with_store(
        buffer_size: usize,
        state: S,
        store: Option<Arc<dyn BlobStore>>,
    ) -> (Self, LedgerClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state,
            store,
        };
        let client = LedgerClient::new(sender);
        (actor, client)
    }

    /// Runs the command loop until the channel closes.
    ///
    /// The `context` is injected into every `apply` call, which lets a
    /// ledger reach other actors through their clients without the two
    /// actors being coupled at construction time.
    pub async fn run(mut self, context: S::Context) {
        let ledger = S::COLLECTION;
        info!(ledger, "Ledger actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Apply {
                    command,
                    respond_to,
                } => {
                    debug!(ledger, ?command, "Apply");
                    match self.state.apply(command, &context).await {
                        Ok(applied) => {
                            if applied.mutated {
                                if let Some(store) = &self.store {
                                    persist_collection(store.as_ref(), ledger, &self.state);
                                }
                            }
                            let _ = respond_to.send(Ok(applied.outcome));
                        }
                        Err(e) => {
                            warn!(ledger, error = %e, "Apply failed");
                            let _ = respond_to.send(Err(ActorError::Ledger(Box::new(e))));
                        }
                    }
                }
                LedgerRequest::Snapshot { respond_to } => {
                    debug!(ledger, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
            }
        }

        info!(ledger, "Ledger actor shutdown");
    }
}
