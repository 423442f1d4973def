//! TOML-backed CredentialRepository implementation.

use crate::dto::StoredSessionV1;
use crate::paths::FolioPaths;
use crate::storage::SessionFile;
use folio_core::error::{FolioError, Result};
use folio_core::session::{CredentialRepository, SessionCredentials};
use std::path::Path;

/// Persists session credentials in `session.toml` under the Folio config
/// directory.
///
/// This is the client's stand-in for browser storage: the session store
/// mirrors every credential mutation here so a restart finds the user
/// still logged in.
pub struct TomlCredentialRepository {
    file: SessionFile,
}

impl TomlCredentialRepository {
    /// Creates a repository rooted at the given directory.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Directory holding `session.toml` (tests pass a temp dir)
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            file: SessionFile::new(base_dir.as_ref().join("session.toml")),
        }
    }

    /// Creates a repository at the default platform location
    /// (`~/.config/folio/session.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    pub fn default_location() -> Result<Self> {
        let base_dir = FolioPaths::config_dir()
            .map_err(|e| FolioError::storage(format!("Failed to resolve config dir: {}", e)))?;
        Ok(Self::new(base_dir))
    }
}

impl CredentialRepository for TomlCredentialRepository {
    fn load(&self) -> Result<Option<SessionCredentials>> {
        let loaded = self.file.load()?.map(SessionCredentials::from);
        tracing::debug!(found = loaded.is_some(), "Loaded persisted session");
        Ok(loaded)
    }

    fn save(&self, credentials: &SessionCredentials) -> Result<()> {
        self.file.save(&StoredSessionV1::from(credentials))?;
        tracing::debug!(user_id = %credentials.user_id, "Persisted session credentials");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.file.remove()?;
        tracing::debug!("Cleared persisted session");
        Ok(())
    }
}
