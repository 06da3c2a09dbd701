//! The [`ActivityTrail`] ledger.

use crate::model::ActivityEntry;
use async_trait::async_trait;
use chrono::Local;
use ledger_actor::{Applied, LedgerState};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Most recent entries kept; the oldest is evicted past this.
pub const ACTIVITY_CAP: usize = 100;

/// Recorded actions, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityTrail(pub Vec<ActivityEntry>);

#[derive(Debug)]
pub enum ActivityCommand {
    Record {
        user_id: String,
        user_email: String,
        action: String,
        metadata: String,
    },
}

#[derive(Debug)]
pub enum ActivityOutcome {
    Recorded(ActivityEntry),
}

/// Recording cannot fail on its own; the only failures are plumbing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActivityError {
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for ActivityError {
    fn from(msg: String) -> Self {
        ActivityError::ActorCommunication(msg)
    }
}

#[async_trait]
impl LedgerState for ActivityTrail {
    type Command = ActivityCommand;
    type Outcome = ActivityOutcome;
    type Context = ();
    type Error = ActivityError;

    const COLLECTION: &'static str = "activity";

    async fn apply(
        &mut self,
        command: ActivityCommand,
        _ctx: &(),
    ) -> Result<Applied<ActivityOutcome>, ActivityError> {
        match command {
            ActivityCommand::Record {
                user_id,
                user_email,
                action,
                metadata,
            } => {
                let entry = ActivityEntry {
                    id: Uuid::new_v4().to_string(),
                    timestamp: Local::now().to_rfc3339(),
                    user_id,
                    user_email,
                    action,
                    metadata,
                };
                self.0.insert(0, entry.clone());
                self.0.truncate(ACTIVITY_CAP);
                Ok(Applied::mutated(ActivityOutcome::Recorded(entry)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn record(trail: &mut ActivityTrail, action: &str) {
        trail
            .apply(
                ActivityCommand::Record {
                    user_id: "user-1".into(),
                    user_email: "a@x.edu".into(),
                    action: action.into(),
                    metadata: String::new(),
                },
                &(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn newest_entry_comes_first() {
        let mut trail = ActivityTrail::default();
        record(&mut trail, "first").await;
        record(&mut trail, "second").await;

        assert_eq!(trail.0[0].action, "second");
        assert_eq!(trail.0[1].action, "first");
    }

    #[tokio::test]
    async fn the_oldest_entry_is_evicted_past_the_cap() {
        let mut trail = ActivityTrail::default();
        for i in 0..ACTIVITY_CAP + 1 {
            record(&mut trail, &format!("action-{i}")).await;
        }

        assert_eq!(trail.0.len(), ACTIVITY_CAP);
        assert_eq!(trail.0[0].action, format!("action-{}", ACTIVITY_CAP));
        // "action-0" was the oldest and is gone.
        assert!(trail.0.iter().all(|e| e.action != "action-0"));
    }
}
