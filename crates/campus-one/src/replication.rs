//! # Replication Token Codec
//!
//! There is no automatic sync between installations; an operator exports
//! their user directory (plus, optionally, the activity trail) as one
//! opaque token, hands it over out of band, and the receiver imports it.
//! The token is base64 over the JSON payload and must round-trip exactly.
//! Decoding is all-or-nothing: a token that fails base64, fails JSON, or
//! lacks the `users` field is rejected whole and nothing is merged.
//!
//! This is a deliberately simple reconciliation primitive, not a CRDT:
//! precedence on import is "incoming wins" per email, nothing more.

use crate::model::{ActivityEntry, User};
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The payload carried by a replication token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicaExport {
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Vec<ActivityEntry>>,
}

/// Why a token was rejected. Rejection never has side effects.
#[derive(Debug, Error)]
pub enum ReplicationError {
    #[error("Replication token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Replication token payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serializes an export into a transportable token.
pub fn encode(export: &ReplicaExport) -> Result<String, ReplicationError> {
    let json = serde_json::to_vec(export)?;
    Ok(BASE64_STANDARD.encode(json))
}

/// Decodes a token back into an export, all-or-nothing.
pub fn decode(token: &str) -> Result<ReplicaExport, ReplicationError> {
    let bytes = BASE64_STANDARD.decode(token.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Credential, UserRole};

    fn export() -> ReplicaExport {
        ReplicaExport {
            users: vec![User {
                id: "user-1".into(),
                name: "Asha".into(),
                email: "asha@students.campus.edu".into(),
                credential: Credential::derive("pw"),
                role: UserRole::Student,
                shop_id: None,
            }],
            activity: None,
        }
    }

    #[test]
    fn tokens_round_trip_exactly() {
        let original = export();
        let token = encode(&original).unwrap();
        let back = decode(&token).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            decode("!!! not base64 !!!"),
            Err(ReplicationError::Encoding(_))
        ));

        let not_json = BASE64_STANDARD.encode("plain text");
        assert!(matches!(
            decode(&not_json),
            Err(ReplicationError::Malformed(_))
        ));
    }

    #[test]
    fn a_payload_without_users_is_rejected() {
        let token = BASE64_STANDARD.encode(r#"{"activity": []}"#);
        assert!(matches!(
            decode(&token),
            Err(ReplicationError::Malformed(_))
        ));
    }
}
