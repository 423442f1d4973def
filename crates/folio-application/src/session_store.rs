//! The session store: single authoritative holder of the authentication
//! credentials.
//!
//! One `Arc<SessionStore>` is shared by every component that needs login
//! state: an explicit, injectable service rather than a hidden global.
//! Every mutation is mirrored to durable storage before
//! observers are notified, so the persisted value and the in-memory value
//! can never be observed diverging, and a restart finds the user still
//! logged in.

use folio_core::error::Result;
use folio_core::session::{CredentialRepository, SessionCredentials, TokenSource};
use std::sync::{Arc, RwLock};

/// Callback invoked synchronously after every session mutation.
pub type SessionObserver = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;

/// A point-in-time view of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl SessionSnapshot {
    /// Derived login state: true iff a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        matches!(&self.token, Some(token) if !token.is_empty())
    }
}

/// Holds the credentials in memory and mirrors every change to the
/// [`CredentialRepository`].
///
/// State mutation itself never fails: a storage failure is logged and
/// surfaced as a notice, but the in-memory state still commits. All reads
/// return the latest committed value.
pub struct SessionStore {
    credentials: RwLock<Option<SessionCredentials>>,
    repository: Arc<dyn CredentialRepository>,
    observers: RwLock<Vec<SessionObserver>>,
}

impl SessionStore {
    /// Creates a store with no session established.
    pub fn new(repository: Arc<dyn CredentialRepository>) -> Self {
        Self {
            credentials: RwLock::new(None),
            repository,
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Restores the persisted session, if any, on startup.
    ///
    /// A missing session is a valid state, not an error; the store simply
    /// stays logged out. No network call is involved.
    pub fn initialize(&self) -> Result<()> {
        let loaded = self.repository.load()?;
        {
            let mut credentials = self.credentials.write().unwrap();
            *credentials = loaded;
        }
        self.notify();
        Ok(())
    }

    /// Establishes a session from a confirmed login/registration response.
    pub fn set_credentials(&self, token: impl Into<String>, user_id: impl Into<String>) {
        self.commit(Some(SessionCredentials::new(token, user_id)));
    }

    /// Replaces (or clears) the token, keeping the stored user id.
    ///
    /// `None` clears the whole session. No validation of token contents is
    /// performed here; the backend is the authority on validity.
    pub fn set_token(&self, token: Option<String>) {
        match token {
            None => self.commit(None),
            Some(token) => {
                let user_id = self.user_id().unwrap_or_default();
                self.commit(Some(SessionCredentials::new(token, user_id)));
            }
        }
    }

    /// Clears the session from memory and storage.
    pub fn logout(&self) {
        self.commit(None);
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        let credentials = self.credentials.read().unwrap();
        credentials.as_ref().map(|c| c.token.clone())
    }

    /// The logged-in user's id, if any.
    pub fn user_id(&self) -> Option<String> {
        let credentials = self.credentials.read().unwrap();
        credentials.as_ref().map(|c| c.user_id.clone())
    }

    /// Derived login state: true iff a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        let credentials = self.credentials.read().unwrap();
        credentials.as_ref().is_some_and(|c| c.is_usable())
    }

    /// A point-in-time view of the session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let credentials = self.credentials.read().unwrap();
        SessionSnapshot {
            token: credentials.as_ref().map(|c| c.token.clone()),
            user_id: credentials.as_ref().map(|c| c.user_id.clone()),
        }
    }

    /// Registers an observer, invoked synchronously after every mutation.
    pub fn subscribe(&self, observer: SessionObserver) {
        let mut observers = self.observers.write().unwrap();
        observers.push(observer);
    }

    /// Commits a new value: memory first, then the storage mirror, then
    /// observers. The state lock is released before observers run.
    fn commit(&self, value: Option<SessionCredentials>) {
        {
            let mut credentials = self.credentials.write().unwrap();
            *credentials = value.clone();
        }

        let persisted = match &value {
            Some(credentials) => self.repository.save(credentials),
            None => self.repository.clear(),
        };
        if let Err(err) = persisted {
            tracing::warn!(error = %err, "Failed to persist session change");
        }

        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        // Clone the list so an observer may itself subscribe without deadlock.
        let observers = self.observers.read().unwrap().clone();
        for observer in observers.iter() {
            observer(&snapshot);
        }
    }
}

impl TokenSource for SessionStore {
    fn token(&self) -> Option<String> {
        SessionStore::token(self)
    }

    fn user_id(&self) -> Option<String> {
        SessionStore::user_id(self)
    }
}
