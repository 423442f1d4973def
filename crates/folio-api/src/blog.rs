//! Article endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use folio_core::blog::{Blog, BlogDraft, BlogGateway, BlogUpdate, FavouriteState, LoveState};
use folio_core::error::{FolioError, Result};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

#[derive(Deserialize)]
struct BlogEnvelope {
    blog: Blog,
}

#[derive(Deserialize)]
struct CreateBlogResponse {
    #[serde(default)]
    blog: Option<Blog>,
}

#[derive(Deserialize)]
struct FavouritesResponse {
    #[serde(default)]
    blogs: Vec<Blog>,
}

impl ApiClient {
    /// Builds the multipart form for publishing a draft, reading and
    /// attaching the image file when present.
    async fn draft_form(&self, draft: &BlogDraft) -> Result<Form> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("content", draft.content.clone());

        if let Some(path) = &draft.image {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime.as_ref())?;
            form = form.part("image", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl BlogGateway for ApiClient {
    async fn all_blogs(&self) -> Result<Vec<Blog>> {
        let response = self.http().get(self.url("/blog/all")).send().await?;
        self.parse(response).await
    }

    async fn blog(&self, blog_id: &str) -> Result<Blog> {
        let response = self
            .http()
            .get(self.url(&format!("/blog/{}", blog_id)))
            .send()
            .await?;

        let envelope: BlogEnvelope = self.parse(response).await.map_err(|err| match err {
            FolioError::Api { status: 404, .. } => FolioError::not_found("blog", blog_id),
            other => other,
        })?;
        Ok(envelope.blog)
    }

    async fn create_blog(&self, draft: &BlogDraft) -> Result<Option<Blog>> {
        let token = self.bearer_token()?;
        let form = self.draft_form(draft).await?;
        let response = self
            .http()
            .post(self.url("/blog/create"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let created: CreateBlogResponse = self.parse(response).await?;
        Ok(created.blog)
    }

    async fn update_blog(&self, blog_id: &str, update: &BlogUpdate) -> Result<Blog> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .put(self.url(&format!("/blog/update/{}", blog_id)))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;

        let envelope: BlogEnvelope = self.parse(response).await?;
        Ok(envelope.blog)
    }

    async fn delete_blog(&self, blog_id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .delete(self.url(&format!("/blog/{}", blog_id)))
            .bearer_auth(token)
            .send()
            .await?;

        self.expect_success(response).await
    }

    async fn toggle_love(&self, blog_id: &str) -> Result<LoveState> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .post(self.url(&format!("/blog/react/{}", blog_id)))
            .bearer_auth(token)
            .send()
            .await?;

        self.parse(response).await
    }

    async fn toggle_favourite(&self, blog_id: &str) -> Result<FavouriteState> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .post(self.url(&format!("/blog/favourite/{}", blog_id)))
            .bearer_auth(token)
            .send()
            .await?;

        self.parse(response).await
    }

    async fn favourite_blogs(&self) -> Result<Vec<Blog>> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .get(self.url("/blog/favourites"))
            .bearer_auth(token)
            .send()
            .await?;

        let favourites: FavouritesResponse = self.parse(response).await?;
        Ok(favourites.blogs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_blog_envelope() {
        let json = r#"{
            "blog": {
                "_id": "b1",
                "title": "Hello",
                "content": "World",
                "author": { "_id": "user-1", "firstName": "Jane", "lastName": "Doe" },
                "createdAt": "2024-05-01T12:00:00.000Z",
                "lovedBy": []
            }
        }"#;

        let envelope: BlogEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.blog.id, "b1");
        assert_eq!(envelope.blog.reactions.love, 0);
    }

    #[test]
    fn test_create_response_may_omit_blog() {
        let created: CreateBlogResponse =
            serde_json::from_str(r#"{ "message": "Blog created" }"#).unwrap();
        assert!(created.blog.is_none());
    }

    #[test]
    fn test_decodes_love_state() {
        let state: LoveState =
            serde_json::from_str(r#"{ "lovedByUser": true, "totalLovers": 4 }"#).unwrap();
        assert!(state.loved_by_user);
        assert_eq!(state.total_lovers, 4);
    }

    #[test]
    fn test_decodes_favourite_state() {
        let json = r#"{ "success": true, "isFavourited": false, "favouritedBy": ["user-2"] }"#;
        let state: FavouriteState = serde_json::from_str(json).unwrap();
        assert!(!state.is_favourited);
        assert_eq!(state.favourited_by, vec!["user-2"]);
    }

    #[test]
    fn test_decodes_favourites_list() {
        let favourites: FavouritesResponse = serde_json::from_str(r#"{ "blogs": [] }"#).unwrap();
        assert!(favourites.blogs.is_empty());
    }
}
