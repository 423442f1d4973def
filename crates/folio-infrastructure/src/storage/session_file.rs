//! Atomic persistence for the session file.
//!
//! Writes go to a temporary file in the same directory, are fsynced, and
//! replace the real file with an atomic rename. A sibling advisory lock
//! file serializes writers. A missing or empty file reads as "no session".

use crate::dto::StoredSessionV1;
use folio_core::error::{FolioError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Handle to the on-disk session file.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Creates a handle for the given path. The file need not exist yet.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(stored))`: A session is persisted
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err(_)`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<StoredSessionV1>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredSessionV1 = toml::from_str(&content)?;
        Ok(Some(stored))
    }

    /// Saves a session atomically, replacing any previous value.
    pub fn save(&self, stored: &StoredSessionV1) -> Result<()> {
        let _lock = self.acquire_lock()?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(stored)?;

        // tmp file in the same directory so the rename stays on one filesystem
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Removes the persisted session. Removing a missing file succeeds.
    pub fn remove(&self) -> Result<()> {
        let _lock = self.acquire_lock()?;

        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| FolioError::storage("Session path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| FolioError::storage("Session path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }

    fn acquire_lock(&self) -> Result<SessionFileLock> {
        SessionFileLock::acquire(&self.path)
    }
}

/// Advisory lock guard; released (and the lock file removed) on drop.
struct SessionFileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl SessionFileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| FolioError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(SessionFileLock { file, lock_path })
    }
}

impl Drop for SessionFileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::STORED_SESSION_VERSION;
    use tempfile::TempDir;

    fn stored(token: &str) -> StoredSessionV1 {
        StoredSessionV1 {
            schema_version: STORED_SESSION_VERSION.to_string(),
            token: token.to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = SessionFile::new(temp_dir.path().join("session.toml"));

        file.save(&stored("jwt-abc")).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.token, "jwt-abc");
        assert_eq!(loaded.user_id, "user-1");
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = SessionFile::new(temp_dir.path().join("missing.toml"));

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        fs::write(&path, "  \n").unwrap();

        let file = SessionFile::new(path);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let file = SessionFile::new(temp_dir.path().join("session.toml"));

        file.save(&stored("first")).unwrap();
        file.save(&stored("second")).unwrap();

        assert_eq!(file.load().unwrap().unwrap().token, "second");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let file = SessionFile::new(temp_dir.path().join("session.toml"));

        file.save(&stored("jwt-abc")).unwrap();
        file.remove().unwrap();
        file.remove().unwrap();

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file = SessionFile::new(temp_dir.path().join("session.toml"));

        file.save(&stored("jwt-abc")).unwrap();

        assert!(!temp_dir.path().join(".session.toml.tmp").exists());
        assert!(temp_dir.path().join("session.toml").exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file = SessionFile::new(temp_dir.path().join("nested").join("session.toml"));

        file.save(&stored("jwt-abc")).unwrap();

        assert_eq!(file.load().unwrap().unwrap().token, "jwt-abc");
    }
}
