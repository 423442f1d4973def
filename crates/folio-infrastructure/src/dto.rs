//! Storage DTOs for persisted session state.
//!
//! Persisted data carries an explicit schema version so the on-disk format
//! can evolve without losing sessions written by older builds.

use folio_core::session::SessionCredentials;
use serde::{Deserialize, Serialize};

/// Current schema version for the stored session file.
pub const STORED_SESSION_VERSION: &str = "1.0.0";

/// On-disk representation of the session credentials (session.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSessionV1 {
    pub schema_version: String,
    pub token: String,
    pub user_id: String,
}

impl From<&SessionCredentials> for StoredSessionV1 {
    fn from(credentials: &SessionCredentials) -> Self {
        Self {
            schema_version: STORED_SESSION_VERSION.to_string(),
            token: credentials.token.clone(),
            user_id: credentials.user_id.clone(),
        }
    }
}

impl From<StoredSessionV1> for SessionCredentials {
    fn from(stored: StoredSessionV1) -> Self {
        Self {
            token: stored.token,
            user_id: stored.user_id,
        }
    }
}
