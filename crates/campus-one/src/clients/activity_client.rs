//! # Activity Client
//!
//! High-level API for the activity trail actor.

use crate::activity_trail::{ActivityCommand, ActivityError, ActivityOutcome, ActivityTrail};
use crate::model::{ActivityEntry, User};
use async_trait::async_trait;
use ledger_actor::{ActorError, LedgerClient, LedgerFacade};
use tracing::instrument;

/// Client for the activity trail actor.
#[derive(Clone)]
pub struct ActivityClient {
    inner: LedgerClient<ActivityTrail>,
}

#[async_trait]
impl LedgerFacade<ActivityTrail> for ActivityClient {
    type Error = ActivityError;

    fn inner(&self) -> &LedgerClient<ActivityTrail> {
        &self.inner
    }

    fn map_error(e: ActorError) -> Self::Error {
        Self::lift(e)
    }
}

impl ActivityClient {
    pub fn new(inner: LedgerClient<ActivityTrail>) -> Self {
        Self { inner }
    }

    fn lift(e: ActorError) -> ActivityError {
        e.into_ledger::<ActivityError>()
            .unwrap_or_else(|other| ActivityError::ActorCommunication(other.to_string()))
    }

    /// Records one action for a user.
    #[instrument(skip(self, user, metadata), fields(user = %user.email))]
    pub async fn record(
        &self,
        user: &User,
        action: &str,
        metadata: impl Into<String> + Send,
    ) -> Result<ActivityEntry, ActivityError> {
        match self
            .inner
            .apply(ActivityCommand::Record {
                user_id: user.id.clone(),
                user_email: user.email.clone(),
                action: action.to_string(),
                metadata: metadata.into(),
            })
            .await
        {
            Ok(ActivityOutcome::Recorded(entry)) => Ok(entry),
            Err(e) => Err(Self::lift(e)),
        }
    }

    /// The recorded actions, newest first.
    pub async fn recent(&self) -> Result<Vec<ActivityEntry>, ActivityError> {
        Ok(self.snapshot().await?.0)
    }
}
