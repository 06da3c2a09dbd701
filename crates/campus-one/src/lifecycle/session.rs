//! The session layer: login and logout against the registry, the
//! persisted session blob, and the ancillary effects (activity entries,
//! the welcome notification) that ride along with them.

use crate::clients::{ActivityClient, RegistryClient, RelayClient};
use crate::model::{ActivityEntry, User};
use crate::registry::{LoginRequest, RegistryError};
use crate::relay::ChannelKind;
use ledger_actor::store::{persist_collection, BlobStore};
use std::sync::Arc;
use tracing::{instrument, warn};

/// Blob key for the active session.
pub const SESSION_KEY: &str = "session";

/// Login, logout, and the active-session blob.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn BlobStore>,
    registry: RegistryClient,
    activity: ActivityClient,
    relay: RelayClient,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn BlobStore>,
        registry: RegistryClient,
        activity: ActivityClient,
        relay: RelayClient,
    ) -> Self {
        Self {
            store,
            registry,
            activity,
            relay,
        }
    }

    /// Logs in and makes the account the active session.
    ///
    /// A failed login has no side effects at all. On success the session
    /// blob is written (best effort), the login lands in the activity
    /// trail, and a welcome email goes out through the relay.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<User, RegistryError> {
        let user = self.registry.login(request).await?;

        persist_collection(self.store.as_ref(), SESSION_KEY, &user);
        if let Err(e) = self
            .activity
            .record(&user, "login", format!("role={:?}", user.role))
            .await
        {
            warn!(error = %e, "Login succeeded but could not be recorded");
        }
        self.relay
            .dispatch(
                ChannelKind::Email,
                &user.email,
                &format!("Hi {}, welcome back to Campus One.", user.name),
                Some("Campus One sign-in"),
            )
            .await;

        Ok(user)
    }

    /// Ends the active session, if any.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Some(user) = self.current() {
            if let Err(e) = self.activity.record(&user, "logout", "").await {
                warn!(error = %e, "Logout could not be recorded");
            }
        }
        if let Err(e) = self.store.remove(SESSION_KEY) {
            warn!(error = %e, "Could not clear the session blob");
        }
    }

    /// The active session, if one is persisted and readable.
    pub fn current(&self) -> Option<User> {
        match self.store.read(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Session blob is corrupt, treating as signed out");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not read the session blob");
                None
            }
        }
    }

    /// Records an activity entry for a user. Thin passthrough used by the
    /// replication entry points.
    pub async fn record(
        &self,
        user: &User,
        action: &str,
        metadata: impl Into<String> + Send,
    ) -> Result<ActivityEntry, crate::activity_trail::ActivityError> {
        self.activity.record(user, action, metadata).await
    }
}
