//! The [`DispatchLog`] ledger.

use async_trait::async_trait;
use chrono::Local;
use ledger_actor::{Applied, LedgerState};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Default number of log rows kept.
pub const DEFAULT_LOG_CAP: usize = 20;

/// Delivery channel of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Email,
    Sms,
    System,
}

/// Where a log entry stands. Entries start out `processing` and are
/// settled later by a detached task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Processing,
    Success,
    Failed,
}

/// One dispatched notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    /// Local wall-clock time of dispatch, `%H:%M:%S`.
    pub timestamp: String,
    pub kind: ChannelKind,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
    pub status: DeliveryStatus,
}

/// The dispatch log, newest first, bounded.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchLog {
    entries: Vec<LogEntry>,
    cap: usize,
}

impl DispatchLog {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

impl Default for DispatchLog {
    fn default() -> Self {
        Self::with_cap(DEFAULT_LOG_CAP)
    }
}

#[derive(Debug)]
pub enum RelayCommand {
    Dispatch {
        kind: ChannelKind,
        target: String,
        content: String,
        subject: Option<String>,
    },
    Settle {
        entry_id: String,
        status: DeliveryStatus,
    },
}

#[derive(Debug)]
pub enum RelayOutcome {
    Logged(LogEntry),
    Settled,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RelayError {
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for RelayError {
    fn from(msg: String) -> Self {
        RelayError::ActorCommunication(msg)
    }
}

#[async_trait]
impl LedgerState for DispatchLog {
    type Command = RelayCommand;
    type Outcome = RelayOutcome;
    type Context = ();
    type Error = RelayError;

    const COLLECTION: &'static str = "relay-log";

    async fn apply(
        &mut self,
        command: RelayCommand,
        _ctx: &(),
    ) -> Result<Applied<RelayOutcome>, RelayError> {
        match command {
            RelayCommand::Dispatch {
                kind,
                target,
                content,
                subject,
            } => {
                let entry = LogEntry {
                    id: Uuid::new_v4().to_string(),
                    timestamp: Local::now().format("%H:%M:%S").to_string(),
                    kind,
                    target,
                    subject,
                    content,
                    status: DeliveryStatus::Processing,
                };
                self.entries.insert(0, entry.clone());
                self.entries.truncate(self.cap);
                Ok(Applied::mutated(RelayOutcome::Logged(entry)))
            }
            RelayCommand::Settle { entry_id, status } => {
                match self.entries.iter_mut().find(|e| e.id == entry_id) {
                    Some(entry) => {
                        entry.status = status;
                        Ok(Applied::mutated(RelayOutcome::Settled))
                    }
                    None => {
                        // The entry was evicted before its flip arrived.
                        debug!(entry_id = %entry_id, "Settle for an evicted log entry");
                        Ok(Applied::unchanged(RelayOutcome::Settled))
                    }
                }
            }
        }
    }
}
