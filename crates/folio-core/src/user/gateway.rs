//! Backend profile gateway trait.

use super::model::{AuthorProfile, OwnProfile, ProfileUpdate, User};
use crate::error::Result;
use async_trait::async_trait;

/// Gateway to the backend's user/profile endpoints.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetches the logged-in user's profile and their articles.
    async fn my_profile(&self) -> Result<OwnProfile>;

    /// Fetches an author's public profile by user id.
    async fn author_profile(&self, user_id: &str) -> Result<AuthorProfile>;

    /// Updates the logged-in user's profile and returns the new record.
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User>;
}
