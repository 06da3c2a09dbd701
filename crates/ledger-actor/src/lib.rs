//! # Ledger Actor
//!
//! Building blocks for systems where a handful of entity collections are
//! each owned by exactly one task. A *ledger* is a whole collection (all
//! appointments, all registered users, ...) treated as a single unit of
//! state; a [`LedgerActor`] owns one ledger, processes commands strictly
//! sequentially, and flushes the ledger to a pluggable blob store after
//! every mutating command.
//!
//! ## Why a single owner per collection?
//!
//! The workloads this crate targets interleave user-initiated mutations
//! with periodic background passes over the same collection (think of a
//! timer that advances time-dependent state). The classic hazard is a
//! background pass doing read-compute-write over the whole collection
//! while a user action sneaks in between the read and the write. Routing
//! every mutation through one mpsc channel into one task removes that
//! hazard by construction: a command's read, compute, and flush all
//! complete before the next command is received. No locks, no lost
//! updates, even on a multi-threaded runtime.
//!
//! ## The three layers
//!
//! 1. **State layer** ([`LedgerState`]) - your collection type and the
//!    commands it understands.
//! 2. **Runtime layer** ([`LedgerActor`]) - the sequential command loop
//!    plus best-effort persistence through a [`store::BlobStore`].
//! 3. **Interface layer** ([`LedgerClient`]) - a cheap-to-clone async
//!    handle; domain-specific wrappers build on [`LedgerFacade`].
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use ledger_actor::{Applied, LedgerActor, LedgerState};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Default, Serialize, Deserialize)]
//! struct Counters(Vec<u64>);
//!
//! #[derive(Debug)]
//! enum CounterCommand {
//!     Push(u64),
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter error")]
//! struct CounterError;
//!
//! #[async_trait]
//! impl LedgerState for Counters {
//!     type Command = CounterCommand;
//!     type Outcome = usize;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     const COLLECTION: &'static str = "counters";
//!
//!     async fn apply(
//!         &mut self,
//!         command: CounterCommand,
//!         _ctx: &(),
//!     ) -> Result<Applied<usize>, CounterError> {
//!         match command {
//!             CounterCommand::Push(value) => {
//!                 self.0.push(value);
//!                 Ok(Applied::mutated(self.0.len()))
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = LedgerActor::ephemeral(8, Counters::default());
//!     tokio::spawn(actor.run(()));
//!
//!     let len = client.apply(CounterCommand::Push(7)).await.unwrap();
//!     assert_eq!(len, 1);
//! }
//! ```
//!
//! ## Context injection
//!
//! Dependencies (typically clients of *other* ledger actors) are injected
//! at runtime via `run(context)`, not at construction time. Create every
//! actor first, then wire clients into the `run` calls of the actors that
//! need them. The dependency graph must stay acyclic for shutdown via
//! channel closure to work.
//!
//! ## Persistence
//!
//! Persistence is best effort by design: a failed flush is logged and
//! swallowed, and the in-memory ledger stays authoritative until the next
//! successful write. See [`store`] for the blob store contract and the
//! file-backed and in-memory implementations.
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`mock::MockLedger`] plus
//! low-level channel helpers so client wrappers can be unit tested
//! without spawning any actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod store;
pub mod tracing;

pub use actor::LedgerActor;
pub use client::LedgerClient;
pub use client_trait::LedgerFacade;
pub use error::ActorError;
pub use message::{LedgerRequest, Response};
pub use state::{Applied, LedgerState};
