//! User and profile endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use folio_core::error::{FolioError, Result};
use folio_core::user::{AuthorProfile, OwnProfile, ProfileGateway, ProfileUpdate, User};
use serde::Deserialize;

#[derive(Deserialize)]
struct UpdateProfileResponse {
    user: User,
}

#[async_trait]
impl ProfileGateway for ApiClient {
    async fn my_profile(&self) -> Result<OwnProfile> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .get(self.url("/api/user"))
            .bearer_auth(token)
            .send()
            .await?;

        self.parse(response).await
    }

    async fn author_profile(&self, user_id: &str) -> Result<AuthorProfile> {
        let response = self
            .http()
            .get(self.url(&format!("/api/user/{}", user_id)))
            .send()
            .await?;

        self.parse(response).await.map_err(|err| match err {
            FolioError::Api { status: 404, .. } => FolioError::not_found("author", user_id),
            other => other,
        })
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .put(self.url("/api/user/profile"))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;

        let updated: UpdateProfileResponse = self.parse(response).await?;
        Ok(updated.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_own_profile() {
        let json = r#"{
            "user": {
                "_id": "user-1",
                "username": "jdoe",
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "bio": "Writes about Rust."
            },
            "blogs": []
        }"#;

        let profile: OwnProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user.display_name(), "Jane Doe");
        assert!(profile.blogs.is_empty());
    }

    #[test]
    fn test_decodes_author_profile_without_blogs_field() {
        let json = r#"{ "user": { "_id": "user-2", "firstName": "John", "lastName": "Roe" } }"#;
        let profile: AuthorProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user.id, "user-2");
        assert!(profile.blogs.is_empty());
    }

    #[test]
    fn test_profile_update_serializes_camel_case() {
        let update = ProfileUpdate {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            bio: "hi".to_string(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("bio").is_some());
    }
}
