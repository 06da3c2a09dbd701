//! # Registry Client
//!
//! High-level API for the identity registry actor, plus the replication
//! entry points: `export` snapshots the directory into a transportable
//! token and `import` decodes and merges one.

use crate::model::{ActivityEntry, User};
use crate::registry::{
    IdentityRegistry, LoginRequest, MergeReport, RegistryCommand, RegistryError, RegistryOutcome,
};
use crate::replication::{self, ReplicaExport};
use async_trait::async_trait;
use ledger_actor::{ActorError, LedgerClient, LedgerFacade};
use tracing::{debug, instrument};

/// Client for the identity registry actor.
#[derive(Clone)]
pub struct RegistryClient {
    inner: LedgerClient<IdentityRegistry>,
}

#[async_trait]
impl LedgerFacade<IdentityRegistry> for RegistryClient {
    type Error = RegistryError;

    fn inner(&self) -> &LedgerClient<IdentityRegistry> {
        &self.inner
    }

    fn map_error(e: ActorError) -> Self::Error {
        Self::lift(e)
    }
}

impl RegistryClient {
    pub fn new(inner: LedgerClient<IdentityRegistry>) -> Self {
        Self { inner }
    }

    fn lift(e: ActorError) -> RegistryError {
        e.into_ledger::<RegistryError>()
            .unwrap_or_else(|other| RegistryError::ActorCommunication(other.to_string()))
    }

    /// Logs in, creating the account on first contact.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<User, RegistryError> {
        debug!("Sending request");
        match self.inner.apply(RegistryCommand::Login(request)).await {
            Ok(RegistryOutcome::LoggedIn(user)) => Ok(user),
            Ok(_) => unreachable!("Login must return a LoggedIn outcome"),
            Err(e) => Err(Self::lift(e)),
        }
    }

    /// Replaces the stored credential for an existing account.
    #[instrument(skip(self, new_password))]
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<(), RegistryError> {
        match self
            .inner
            .apply(RegistryCommand::ResetPassword {
                email: email.to_string(),
                new_password: new_password.to_string(),
            })
            .await
        {
            Ok(RegistryOutcome::PasswordReset) => Ok(()),
            Ok(_) => unreachable!("ResetPassword must return a PasswordReset outcome"),
            Err(e) => Err(Self::lift(e)),
        }
    }

    /// All registered accounts, in insertion order.
    pub async fn users(&self) -> Result<Vec<User>, RegistryError> {
        Ok(self.snapshot().await?.0)
    }

    /// Serializes the directory (and optionally the activity trail) into
    /// a transportable token.
    #[instrument(skip(self, activity))]
    pub async fn export(
        &self,
        activity: Option<Vec<ActivityEntry>>,
    ) -> Result<String, RegistryError> {
        let users = self.users().await?;
        let token = replication::encode(&ReplicaExport { users, activity })?;
        Ok(token)
    }

    /// Decodes a token and merges its users into the directory, incoming
    /// records winning on conflicting emails. A malformed token is
    /// rejected whole; the directory is untouched.
    #[instrument(skip(self, token))]
    pub async fn import(&self, token: &str) -> Result<MergeReport, RegistryError> {
        let export = replication::decode(token)?;
        match self
            .inner
            .apply(RegistryCommand::Merge {
                users: export.users,
            })
            .await
        {
            Ok(RegistryOutcome::Merged(report)) => Ok(report),
            Ok(_) => unreachable!("Merge must return a Merged outcome"),
            Err(e) => Err(Self::lift(e)),
        }
    }
}
