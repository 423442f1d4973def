//! Credential persistence and token access traits.

use super::model::SessionCredentials;
use crate::error::Result;

/// An abstract repository for persisting authentication credentials.
///
/// This trait defines the contract for durable credential storage,
/// decoupling the session store from the specific storage mechanism
/// (TOML file, keychain, in-memory test double).
///
/// Operations are synchronous on purpose: the session store mirrors every
/// mutation to storage before notifying observers, so the persisted value
/// and the in-memory value can never be observed diverging.
pub trait CredentialRepository: Send + Sync {
    /// Loads the stored credentials.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(credentials))`: A session was persisted
    /// - `Ok(None)`: No session stored (a valid state, not an error)
    /// - `Err(_)`: Storage could not be read or parsed
    fn load(&self) -> Result<Option<SessionCredentials>>;

    /// Persists the given credentials, replacing any previous value.
    fn save(&self, credentials: &SessionCredentials) -> Result<()>;

    /// Removes the persisted credentials, if any.
    ///
    /// Clearing an already-empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// Read-only access to the current session credentials.
///
/// The API client depends on this seam to attach the bearer token to
/// authenticated requests without holding a reference to the full session
/// store.
pub trait TokenSource: Send + Sync {
    /// The current bearer token, if a session is established.
    fn token(&self) -> Option<String>;

    /// The current user's identifier, if a session is established.
    fn user_id(&self) -> Option<String>;
}
