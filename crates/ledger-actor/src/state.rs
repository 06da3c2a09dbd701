//! # LedgerState Trait
//!
//! The `LedgerState` trait is the contract a whole-collection state type
//! implements to be owned by a [`crate::LedgerActor`]. Unlike a per-entity
//! CRUD scheme, the unit of ownership here is the entire collection: the
//! command enum can express anything from "append one row" to "run a pass
//! over every row", and each command is applied atomically with respect to
//! every other command.
//!
//! Implementations must uphold one invariant: a failed `apply` leaves the
//! state untouched. Validate first, mutate after.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

/// The result of a successful command, paired with whether the ledger
/// actually changed. Only mutated applies trigger a persistence flush, so
/// an idle background pass does not rewrite an unchanged blob.
#[derive(Debug)]
pub struct Applied<O> {
    pub outcome: O,
    pub mutated: bool,
}

impl<O> Applied<O> {
    /// The command changed the ledger; the actor will flush it.
    pub fn mutated(outcome: O) -> Self {
        Self {
            outcome,
            mutated: true,
        }
    }

    /// The command left the ledger as it was; no flush.
    pub fn unchanged(outcome: O) -> Self {
        Self {
            outcome,
            mutated: false,
        }
    }
}

/// Contract for a collection managed by a [`crate::LedgerActor`].
///
/// # Associated Types
///
/// The associated types tie a ledger to its own command and outcome
/// enums, so a command for one ledger cannot be sent to another. The
/// error type is per-ledger rather than per-command: one enum covers the
/// whole command surface, which keeps client signatures uniform at the
/// cost of some theoretical precision.
///
/// # Context
///
/// `Context` carries runtime dependencies (clients of other actors, or
/// policy knobs) injected through [`crate::LedgerActor::run`]. Use `()`
/// when the ledger is self-contained.
#[async_trait]
pub trait LedgerState: Clone + Debug + Serialize + Send + 'static {
    /// Mutations and passes this ledger understands.
    type Command: Send + Debug;

    /// What a successful command reports back.
    type Outcome: Send + Debug;

    /// Runtime dependencies injected into every `apply` call.
    type Context: Send + Sync;

    /// The error type for this ledger.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Blob key this collection is persisted under.
    const COLLECTION: &'static str;

    /// Apply one command. Must not leave partial mutations behind on
    /// error.
    async fn apply(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Applied<Self::Outcome>, Self::Error>;
}
