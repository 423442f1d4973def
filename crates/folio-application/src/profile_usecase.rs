//! Profile fetch and edit.

use crate::session_store::SessionStore;
use crate::support::surface_failure;
use folio_core::error::{FolioError, Result};
use folio_core::user::{
    AuthorProfile, OwnProfile, ProfileGateway, ProfileUpdate, User, validate_profile_update,
};
use std::sync::Arc;

/// Use case for the logged-in user's profile and public author pages.
pub struct ProfileUseCase {
    gateway: Arc<dyn ProfileGateway>,
    session: Arc<SessionStore>,
}

impl ProfileUseCase {
    pub fn new(gateway: Arc<dyn ProfileGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Fetches the logged-in user's profile and their articles.
    pub async fn my_profile(&self) -> Result<OwnProfile> {
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        self.gateway
            .my_profile()
            .await
            .map_err(|err| surface_failure(&self.session, err))
    }

    /// Fetches an author's public profile. No session required.
    pub async fn author_profile(&self, user_id: &str) -> Result<AuthorProfile> {
        self.gateway.author_profile(user_id).await
    }

    /// Updates the logged-in user's profile after validation and returns
    /// the confirmed record.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        validate_profile_update(&update)?;
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        self.gateway
            .update_profile(&update)
            .await
            .map_err(|err| surface_failure(&self.session, err))
    }
}
