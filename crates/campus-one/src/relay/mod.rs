//! # Notification Relay
//!
//! Fire-and-forget dispatch of email and SMS style notifications. Every
//! dispatch appends a `processing` entry to a bounded, newest-first log;
//! a detached task hands the message to the configured transport and
//! flips the entry to `success` after a short delay. Nothing here ever
//! propagates a delivery failure back to the workflow that triggered it,
//! and the log itself is session-scoped: it is the one ledger that is
//! never persisted.
//!
//! ## Structure
//!
//! - [`entity`] - the [`DispatchLog`] ledger and its entry types
//! - [`transport`] - the outbound delivery seam
//! - [`new()`] - factory for the ephemeral actor and its client

pub mod entity;
pub mod transport;

pub use entity::{
    ChannelKind, DeliveryStatus, DispatchLog, LogEntry, RelayCommand, RelayError, RelayOutcome,
};
pub use transport::{ConsoleTransport, Transport, TransportError};

use crate::clients::RelayClient;
use ledger_actor::LedgerActor;
use std::sync::Arc;
use std::time::Duration;

/// Creates the relay actor and its client. The log lives in memory only.
pub fn new(
    log_cap: usize,
    transport: Arc<dyn Transport>,
    flip_delay: Duration,
) -> (LedgerActor<DispatchLog>, RelayClient) {
    let (actor, client) = LedgerActor::ephemeral(32, DispatchLog::with_cap(log_cap));
    (actor, RelayClient::new(client, transport, flip_delay))
}
