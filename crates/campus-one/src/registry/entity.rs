//! The [`IdentityRegistry`] ledger: upsert-on-login, password reset, and
//! the merge reconciler.

use crate::registry::actions::{LoginRequest, MergeReport, RegistryCommand, RegistryOutcome};
use crate::registry::error::RegistryError;
use crate::model::{Credential, User, UserRole};
use async_trait::async_trait;
use ledger_actor::{Applied, LedgerState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const STUDENT_PLACEHOLDER: &str = "Student Guest";
const SELLER_PLACEHOLDER: &str = "Authorized Manager";

fn placeholder_for(role: UserRole) -> &'static str {
    match role {
        UserRole::Student => STUDENT_PLACEHOLDER,
        UserRole::Seller => SELLER_PLACEHOLDER,
    }
}

fn is_placeholder(name: &str) -> bool {
    name.is_empty() || name == STUDENT_PLACEHOLDER || name == SELLER_PLACEHOLDER
}

/// Every registered account, in insertion order. Uniqueness by lowercased
/// email is enforced here, not by storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityRegistry(pub Vec<User>);

#[async_trait]
impl LedgerState for IdentityRegistry {
    type Command = RegistryCommand;
    type Outcome = RegistryOutcome;
    type Context = ();
    type Error = RegistryError;

    const COLLECTION: &'static str = "users";

    async fn apply(
        &mut self,
        command: RegistryCommand,
        _ctx: &(),
    ) -> Result<Applied<RegistryOutcome>, RegistryError> {
        match command {
            RegistryCommand::Login(request) => self.login(request),
            RegistryCommand::ResetPassword {
                email,
                new_password,
            } => {
                let key = email.to_lowercase();
                let user = self
                    .0
                    .iter_mut()
                    .find(|u| u.email_key() == key)
                    .ok_or(RegistryError::UnknownEmail(email))?;
                user.credential = Credential::derive(&new_password);
                Ok(Applied::mutated(RegistryOutcome::PasswordReset))
            }
            RegistryCommand::Merge { users } => {
                let report = self.merge(users);
                let outcome = RegistryOutcome::Merged(report);
                if report.added == 0 && report.replaced == 0 {
                    Ok(Applied::unchanged(outcome))
                } else {
                    Ok(Applied::mutated(outcome))
                }
            }
        }
    }
}

impl IdentityRegistry {
    fn login(
        &mut self,
        request: LoginRequest,
    ) -> Result<Applied<RegistryOutcome>, RegistryError> {
        if request.role == UserRole::Seller && request.shop_id.is_none() {
            return Err(RegistryError::Validation(
                "a seller login must name its shop".to_string(),
            ));
        }

        let key = request.email.to_lowercase();
        let incoming_name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        if let Some(user) = self.0.iter_mut().find(|u| u.email_key() == key) {
            if user.role != request.role {
                return Err(RegistryError::Validation(format!(
                    "{} is registered with a different role",
                    user.email
                )));
            }
            if !user.credential.matches(&request.password) {
                return Err(RegistryError::CredentialMismatch);
            }

            let mut mutated = false;
            if let Some(name) = incoming_name {
                if is_placeholder(&user.name) && user.name != name {
                    user.name = name.to_string();
                    mutated = true;
                }
            }
            if request.role == UserRole::Seller && request.shop_id != user.shop_id {
                user.shop_id = request.shop_id;
                mutated = true;
            }

            let outcome = RegistryOutcome::LoggedIn(user.clone());
            return Ok(if mutated {
                Applied::mutated(outcome)
            } else {
                Applied::unchanged(outcome)
            });
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: incoming_name
                .unwrap_or(placeholder_for(request.role))
                .to_string(),
            email: key,
            credential: Credential::derive(&request.password),
            role: request.role,
            shop_id: request.shop_id,
        };
        self.0.push(user.clone());
        Ok(Applied::mutated(RegistryOutcome::LoggedIn(user)))
    }

    /// Merge-by-email with incoming precedence. Existing records are
    /// replaced in place; unseen emails are appended in import order.
    /// Importing the same list twice changes nothing on the second pass.
    fn merge(&mut self, users: Vec<User>) -> MergeReport {
        let mut report = MergeReport::default();
        for incoming in users {
            let key = incoming.email_key();
            match self.0.iter_mut().find(|u| u.email_key() == key) {
                Some(existing) => {
                    if *existing != incoming {
                        *existing = incoming;
                        report.replaced += 1;
                    }
                }
                None => {
                    self.0.push(incoming);
                    report.added += 1;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_login(email: &str, password: &str, name: Option<&str>) -> LoginRequest {
        LoginRequest {
            name: name.map(str::to_string),
            email: email.to_string(),
            password: password.to_string(),
            role: UserRole::Student,
            shop_id: None,
        }
    }

    async fn login(
        registry: &mut IdentityRegistry,
        request: LoginRequest,
    ) -> Result<User, RegistryError> {
        match registry.apply(RegistryCommand::Login(request), &()).await {
            Ok(applied) => match applied.outcome {
                RegistryOutcome::LoggedIn(user) => Ok(user),
                other => panic!("unexpected outcome {other:?}"),
            },
            Err(e) => Err(e),
        }
    }

    #[tokio::test]
    async fn first_login_registers_and_lowercases_the_email() {
        let mut registry = IdentityRegistry::default();
        let user = login(
            &mut registry,
            student_login("Asha@Students.Campus.Edu", "pw", Some("Asha")),
        )
        .await
        .unwrap();

        assert_eq!(user.email, "asha@students.campus.edu");
        assert_eq!(user.name, "Asha");
        assert_eq!(registry.0.len(), 1);
    }

    #[tokio::test]
    async fn wrong_password_is_a_credential_mismatch() {
        let mut registry = IdentityRegistry::default();
        login(&mut registry, student_login("a@x.edu", "right", None))
            .await
            .unwrap();

        let err = login(&mut registry, student_login("a@x.edu", "wrong", None))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::CredentialMismatch));
        assert_eq!(registry.0.len(), 1);
    }

    #[tokio::test]
    async fn placeholder_names_are_refreshed_but_real_names_are_kept() {
        let mut registry = IdentityRegistry::default();
        let first = login(&mut registry, student_login("a@x.edu", "pw", None))
            .await
            .unwrap();
        assert_eq!(first.name, STUDENT_PLACEHOLDER);

        let named = login(&mut registry, student_login("a@x.edu", "pw", Some("Asha")))
            .await
            .unwrap();
        assert_eq!(named.name, "Asha");

        let renamed = login(&mut registry, student_login("a@x.edu", "pw", Some("Other")))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Asha");
    }

    #[tokio::test]
    async fn seller_login_requires_a_shop() {
        let mut registry = IdentityRegistry::default();
        let err = login(
            &mut registry,
            LoginRequest {
                name: Some("Manager".into()),
                email: "m@x.edu".into(),
                password: "pw".into(),
                role: UserRole::Seller,
                shop_id: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
        assert!(registry.0.is_empty());
    }

    #[tokio::test]
    async fn merge_prefers_incoming_records_and_is_idempotent() {
        let mut registry = IdentityRegistry::default();
        login(&mut registry, student_login("a@x.edu", "pw", Some("Old")))
            .await
            .unwrap();

        let mut incoming = registry.0[0].clone();
        incoming.name = "New".to_string();
        let other = User {
            id: "user-2".into(),
            name: "Fresh".into(),
            email: "b@x.edu".into(),
            credential: Credential::derive("pw"),
            role: UserRole::Student,
            shop_id: None,
        };

        let report = registry.merge(vec![incoming.clone(), other.clone()]);
        assert_eq!(report, MergeReport { added: 1, replaced: 1 });
        assert_eq!(registry.0[0].name, "New");
        assert_eq!(registry.0.len(), 2);

        let again = registry.merge(vec![incoming, other]);
        assert_eq!(again, MergeReport::default());
        assert_eq!(registry.0.len(), 2);
    }

    #[tokio::test]
    async fn reset_password_reissues_the_credential() {
        let mut registry = IdentityRegistry::default();
        login(&mut registry, student_login("a@x.edu", "old", None))
            .await
            .unwrap();

        registry
            .apply(
                RegistryCommand::ResetPassword {
                    email: "A@X.edu".into(),
                    new_password: "new".into(),
                },
                &(),
            )
            .await
            .unwrap();

        assert!(registry.0[0].credential.matches("new"));
        assert!(!registry.0[0].credential.matches("old"));

        let err = registry
            .apply(
                RegistryCommand::ResetPassword {
                    email: "nobody@x.edu".into(),
                    new_password: "new".into(),
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownEmail(_)));
    }
}
