//! The outbound delivery seam.
//!
//! The real outbound service sits behind this trait so the rest of the
//! system only ever sees a best-effort boundary. The relay swallows
//! transport errors; implementations are free to fail loudly.

use crate::relay::entity::ChannelKind;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("Transport rejected the message: {0}")]
pub struct TransportError(pub String);

/// Delivers one notification to the outside world.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(
        &self,
        kind: ChannelKind,
        target: &str,
        subject: Option<&str>,
        content: &str,
    ) -> Result<(), TransportError>;
}

/// Default transport: logs the message instead of sending it anywhere.
pub struct ConsoleTransport;

#[async_trait]
impl Transport for ConsoleTransport {
    async fn deliver(
        &self,
        kind: ChannelKind,
        target: &str,
        subject: Option<&str>,
        content: &str,
    ) -> Result<(), TransportError> {
        info!(?kind, target, subject, content, "Relay delivery");
        Ok(())
    }
}
