//! # Campus One
//!
//! A campus marketplace: students browse vendor shops, book service
//! appointments, and sellers manage inventory and the appointment
//! lifecycle. There is no central server; each installation persists its
//! state to a local blob store and directories are reconciled by hand
//! through replication tokens.
//!
//! Every entity collection is owned by a single ledger actor (see the
//! `ledger-actor` crate), so the periodic sweep and user actions are
//! serialized and persistence happens after each mutation.
//!
//! ## Modules
//!
//! - [`model`] - users, shops, appointments, activity entries
//! - [`appointment_book`] - the appointment lifecycle state machine and
//!   the time-driven sweep
//! - [`registry`] - the user directory and the merge reconciler
//! - [`catalog`] - the vendor directory with seeded inventory
//! - [`activity_trail`] - the capped audit trail
//! - [`relay`] - fire-and-forget notification dispatch
//! - [`replication`] - the export/import token codec
//! - [`clients`] - typed wrappers over the actor channels
//! - [`lifecycle`] - system orchestration, sessions, and the sweep driver
//! - [`voice`] - the assistant's tool-call boundary
//! - [`config`] - runtime tunables

pub mod activity_trail;
pub mod appointment_book;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod relay;
pub mod replication;
pub mod seed;
pub mod voice;
