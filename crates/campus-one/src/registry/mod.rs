//! # Identity Registry Actor
//!
//! The user directory, keyed by lowercased email. Accounts are created on
//! first successful login, refreshed on later logins, and never deleted.
//! The registry is also one half of the replication story: the merge
//! command folds an imported user list into the local directory with
//! incoming records winning on conflicting emails.
//!
//! ## Structure
//!
//! - [`actions`] - login, password reset, and merge commands
//! - [`entity`] - the [`IdentityRegistry`] ledger
//! - [`error`] - [`RegistryError`]
//! - [`new()`] - factory wiring the ledger to the blob store

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::IdentityRegistry;
pub use error::RegistryError;

use crate::clients::RegistryClient;
use ledger_actor::store::{load_collection, BlobStore};
use ledger_actor::{LedgerActor, LedgerState};
use std::sync::Arc;

/// Creates the registry actor and its client, loading any persisted
/// directory from the store.
pub fn new(store: Arc<dyn BlobStore>) -> (LedgerActor<IdentityRegistry>, RegistryClient) {
    let registry: IdentityRegistry = load_collection(store.as_ref(), IdentityRegistry::COLLECTION);
    let (actor, client) = LedgerActor::persistent(32, registry, store);
    (actor, RegistryClient::new(client))
}
