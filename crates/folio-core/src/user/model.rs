//! User records and profile payloads.

use crate::blog::Blog;
use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
}

impl User {
    /// Full display name of the user.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The logged-in user's own profile, with their published articles.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnProfile {
    pub user: User,
    #[serde(default)]
    pub blogs: Vec<Blog>,
}

/// Another author's public profile, with their published articles.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorProfile {
    pub user: User,
    #[serde(default)]
    pub blogs: Vec<Blog>,
}

/// Editable fields of the logged-in user's profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
}

/// Validates a profile edit before dispatch.
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<()> {
    if update.first_name.trim().is_empty() {
        return Err(FolioError::validation("First name cannot be empty"));
    }
    if update.last_name.trim().is_empty() {
        return Err(FolioError::validation("Last name cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_trims_missing_parts() {
        let user = User {
            id: "user-1".to_string(),
            username: "jdoe".to_string(),
            first_name: "Jane".to_string(),
            last_name: String::new(),
            email: String::new(),
            bio: String::new(),
        };
        assert_eq!(user.display_name(), "Jane");
    }

    #[test]
    fn test_validate_profile_update() {
        let update = ProfileUpdate {
            first_name: "Jane".to_string(),
            last_name: "".to_string(),
            bio: String::new(),
        };
        assert!(validate_profile_update(&update).is_err());
    }
}
