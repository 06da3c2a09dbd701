//! # Appointment Book Actor
//!
//! The appointment book owns every appointment in the system and is the
//! only place their lifecycle advances. Two kinds of traffic arrive on
//! its channel: seller and student actions (book, accept, decline, settle
//! payment, close) and the periodic sweep that drives the time-dependent
//! transition and the reminder sub-protocol. Because the actor applies
//! one command at a time, a sweep pass can never trample a concurrent
//! user action or vice versa.
//!
//! Seller actions carry the caller's shop id and are verified against the
//! appointment inside the actor, so a client that forgot to filter by
//! ownership still cannot touch another shop's bookings.
//!
//! ## Structure
//!
//! - [`actions`] - command, outcome, and booking request types
//! - [`entity`] - the [`AppointmentBook`] ledger and its transitions
//! - [`error`] - [`AppointmentError`]
//! - [`new()`] - factory wiring the ledger to the blob store

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::{AppointmentBook, AppointmentContext, ReminderPolicy};
pub use error::AppointmentError;

use crate::clients::AppointmentClient;
use ledger_actor::store::{load_collection, BlobStore};
use ledger_actor::{LedgerActor, LedgerState};
use std::sync::Arc;

/// Creates the appointment book actor and its client, loading any
/// persisted appointments from the store.
pub fn new(store: Arc<dyn BlobStore>) -> (LedgerActor<AppointmentBook>, AppointmentClient) {
    let book: AppointmentBook = load_collection(store.as_ref(), AppointmentBook::COLLECTION);
    let (actor, client) = LedgerActor::persistent(32, book, store);
    (actor, AppointmentClient::new(client))
}
