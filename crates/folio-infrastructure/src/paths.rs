//! Unified path management for Folio client storage.
//!
//! All durable client state lives under a single per-user directory,
//! resolved per platform via the `dirs` crate.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Folio.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/folio/             # Config directory
/// └── session.toml             # Persisted session credentials
/// ```
pub struct FolioPaths;

impl FolioPaths {
    /// Returns the Folio configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/folio/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("folio"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the persisted session file.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
