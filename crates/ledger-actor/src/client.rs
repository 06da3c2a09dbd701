//! # Ledger Client
//!
//! The generic client half of a ledger actor. It holds only the sender
//! end of the command channel, so cloning is cheap and clones can be
//! handed to any task that needs to reach the ledger.

use crate::error::ActorError;
use crate::message::LedgerRequest;
use crate::state::LedgerState;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for one [`crate::LedgerActor`].
#[derive(Clone)]
pub struct LedgerClient<S: LedgerState> {
    sender: mpsc::Sender<LedgerRequest<S>>,
}

impl<S: LedgerState> LedgerClient<S> {
    pub fn new(sender: mpsc::Sender<LedgerRequest<S>>) -> Self {
        Self { sender }
    }

    /// Sends one command and waits for its outcome.
    pub async fn apply(&self, command: S::Command) -> Result<S::Outcome, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Apply {
                command,
                respond_to,
            })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)?
    }

    /// Fetches a clone of the whole collection.
    pub async fn snapshot(&self) -> Result<S, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Snapshot { respond_to })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)?
    }
}
