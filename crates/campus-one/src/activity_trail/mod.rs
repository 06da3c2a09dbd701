//! # Activity Trail Actor
//!
//! An append-only record of significant workflow actions, newest first,
//! capped at the most recent hundred entries. Everything that lands here
//! also exists as a domain effect somewhere else; the trail is the audit
//! view, not the source of truth.

pub mod entity;

pub use entity::{ActivityCommand, ActivityError, ActivityOutcome, ActivityTrail, ACTIVITY_CAP};

use crate::clients::ActivityClient;
use ledger_actor::store::{load_collection, BlobStore};
use ledger_actor::{LedgerActor, LedgerState};
use std::sync::Arc;

/// Creates the activity trail actor and its client, loading any persisted
/// entries from the store.
pub fn new(store: Arc<dyn BlobStore>) -> (LedgerActor<ActivityTrail>, ActivityClient) {
    let trail: ActivityTrail = load_collection(store.as_ref(), ActivityTrail::COLLECTION);
    let (actor, client) = LedgerActor::persistent(32, trail, store);
    (actor, ActivityClient::new(client))
}
