//! # Relay Client
//!
//! The dispatch side of the notification relay. `dispatch` appends the
//! log entry and returns immediately; delivery and the status flip run in
//! a detached task. No error from the transport or the flip ever reaches
//! the workflow that triggered the notification.

use crate::relay::{
    ChannelKind, DeliveryStatus, DispatchLog, LogEntry, RelayCommand, RelayOutcome, Transport,
};
use ledger_actor::LedgerClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the notification relay.
#[derive(Clone)]
pub struct RelayClient {
    inner: LedgerClient<DispatchLog>,
    transport: Arc<dyn Transport>,
    flip_delay: Duration,
}

impl RelayClient {
    pub fn new(
        inner: LedgerClient<DispatchLog>,
        transport: Arc<dyn Transport>,
        flip_delay: Duration,
    ) -> Self {
        Self {
            inner,
            transport,
            flip_delay,
        }
    }

    /// Dispatches one notification, best effort.
    ///
    /// Returns the `processing` log entry, or `None` when even the log
    /// append failed; either way the caller's workflow continues.
    #[instrument(skip(self, content, subject))]
    pub async fn dispatch(
        &self,
        kind: ChannelKind,
        target: &str,
        content: &str,
        subject: Option<&str>,
    ) -> Option<LogEntry> {
        let entry = match self
            .inner
            .apply(RelayCommand::Dispatch {
                kind,
                target: target.to_string(),
                content: content.to_string(),
                subject: subject.map(str::to_string),
            })
            .await
        {
            Ok(RelayOutcome::Logged(entry)) => entry,
            Ok(_) => unreachable!("Dispatch must return a Logged outcome"),
            Err(e) => {
                warn!(target, error = %e, "Dispatch log unavailable, dropping notification record");
                return None;
            }
        };

        let inner = self.inner.clone();
        let transport = self.transport.clone();
        let flip_delay = self.flip_delay;
        let entry_id = entry.id.clone();
        let target = target.to_string();
        let subject = subject.map(str::to_string);
        let content = content.to_string();
        tokio::spawn(async move {
            if let Err(e) = transport
                .deliver(kind, &target, subject.as_deref(), &content)
                .await
            {
                warn!(target = %target, error = %e, "Delivery failed, keeping best-effort status");
            }
            tokio::time::sleep(flip_delay).await;
            if let Err(e) = inner
                .apply(RelayCommand::Settle {
                    entry_id,
                    status: DeliveryStatus::Success,
                })
                .await
            {
                debug!(error = %e, "Dispatch log gone before the status flip");
            }
        });

        Some(entry)
    }

    /// The dispatch log, newest first. Empty when the relay is gone.
    pub async fn log(&self) -> Vec<LogEntry> {
        match self.inner.snapshot().await {
            Ok(log) => log.entries().to_vec(),
            Err(_) => Vec::new(),
        }
    }
}
