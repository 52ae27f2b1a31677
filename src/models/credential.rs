use std::fmt;

use serde::{Deserialize, Serialize};

/// Stored identity record for one portal user (`usuario` row).
/// Read-only to this crate — never mutated here.
#[derive(Clone)]
pub struct Credential {
    pub user_id: i32,
    pub username: String,
    pub role_id: i32,
    /// Password hash as stored. Bcrypt for current accounts, an unsalted
    /// hex digest for pre-migration ones. Empty when the column is NULL.
    pub stored_hash: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("role_id", &self.role_id)
            .field("stored_hash", &"<redacted>")
            .finish()
    }
}

/// Session produced by a successful login. Lives for the UI session,
/// discarded on logout, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: i32,
    pub username: String,
    pub role_id: i32,
    pub patient_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_redacts_hash() {
        let cred = Credential {
            user_id: 1,
            username: "maria".to_string(),
            role_id: 2,
            stored_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        };
        let rendered = format!("{cred:?}");
        assert!(rendered.contains("maria"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("$2b$12$"));
    }

    #[test]
    fn session_context_round_trips_through_json() {
        let session = SessionContext {
            user_id: 7,
            username: "maria".to_string(),
            role_id: 3,
            patient_id: 42,
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: SessionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
