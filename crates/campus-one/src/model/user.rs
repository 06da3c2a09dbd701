use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Role of a registered account.
///
/// The wire form is the uppercase tag; `"USER"` is accepted as a legacy
/// alias for the student role when decoding older blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "STUDENT", alias = "USER")]
    Student,
    #[serde(rename = "SELLER")]
    Seller,
}

/// A salted password digest.
///
/// Passwords are never stored or compared in the clear: the stored record
/// keeps a per-user random salt plus the hex SHA-256 of salt and
/// password, and a login check recomputes the digest. The equality
/// contract is the same as a plain comparison would give.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub salt: String,
    pub digest: String,
}

impl Credential {
    /// Derives a fresh credential with a random salt.
    pub fn derive(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest_with(&salt, password);
        Self { salt, digest }
    }

    /// Checks a candidate password against the stored digest.
    pub fn matches(&self, password: &str) -> bool {
        Self::digest_with(&self.salt, password) == self.digest
    }

    fn digest_with(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// A registered account. Identity key is the lowercased email; accounts
/// are created on first successful login and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub credential: Credential,
    pub role: UserRole,
    /// A seller manages exactly one shop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<String>,
}

impl User {
    /// The case-insensitive identity key.
    pub fn email_key(&self) -> String {
        self.email.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_matches_only_the_original_password() {
        let credential = Credential::derive("hunter2");
        assert!(credential.matches("hunter2"));
        assert!(!credential.matches("hunter3"));
    }

    #[test]
    fn salts_differ_between_derivations() {
        let a = Credential::derive("same");
        let b = Credential::derive("same");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn legacy_user_role_alias_decodes_as_student() {
        let role: UserRole = serde_json::from_str(r#""USER""#).unwrap();
        assert_eq!(role, UserRole::Student);
        assert_eq!(serde_json::to_string(&role).unwrap(), r#""STUDENT""#);
    }
}
