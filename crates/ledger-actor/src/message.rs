//! # Messages
//!
//! The request enum exchanged between a [`crate::LedgerClient`] and its
//! [`crate::LedgerActor`]. The surface is deliberately small: every
//! mutation is an `Apply` carrying the ledger's own command type, and
//! every read is a `Snapshot` of the whole collection. Callers filter and
//! project on their side of the channel, which keeps the actor loop free
//! of query logic.

use crate::error::ActorError;
use crate::state::LedgerState;
use tokio::sync::oneshot;

/// One-shot reply channel used by ledger actors.
pub type Response<T> = oneshot::Sender<Result<T, ActorError>>;

/// Requests a ledger actor processes, one at a time.
#[derive(Debug)]
pub enum LedgerRequest<S: LedgerState> {
    /// Run one command against the ledger.
    Apply {
        command: S::Command,
        respond_to: Response<S::Outcome>,
    },
    /// Clone the current state of the whole collection.
    Snapshot { respond_to: Response<S> },
}
