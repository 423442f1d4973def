//! Credential domain models.

use crate::user::User;
use serde::{Deserialize, Serialize};

/// The authentication credentials held for a logged-in user.
///
/// Both fields are opaque, backend-assigned strings. They are persisted
/// together and cleared together; a missing pair is the logged-out state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    /// Bearer token attached to every authenticated request
    pub token: String,
    /// Identifier of the logged-in user, used for client-side membership
    /// checks (likes, favourites)
    pub user_id: String,
}

impl SessionCredentials {
    /// Creates a new credential pair.
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }

    /// Returns true if the token is present and non-empty.
    ///
    /// No validation of token contents happens client-side; the backend is
    /// the authority on token validity.
    pub fn is_usable(&self) -> bool {
        !self.token.is_empty()
    }
}

/// A successful authentication response from the backend.
///
/// Login always carries the user; registration may omit it, in which case
/// the caller must log in explicitly before the session is established.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<User>,
}

/// Payload for the registration endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_not_usable() {
        let credentials = SessionCredentials::new("", "user-1");
        assert!(!credentials.is_usable());
    }

    #[test]
    fn test_non_empty_token_is_usable() {
        let credentials = SessionCredentials::new("jwt-abc", "user-1");
        assert!(credentials.is_usable());
    }
}
