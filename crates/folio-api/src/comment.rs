//! Comment endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use folio_core::comment::{Comment, CommentGateway};
use folio_core::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostCommentRequest<'a> {
    content: &'a str,
    /// `null` marks a top-level comment; the backend expects the field to
    /// be present either way.
    parent_comment_id: Option<&'a str>,
}

/// Comment endpoints wrap their payload in a `{ success, data }` envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, treating `success: false` (or a missing
    /// payload) as a backend-reported failure.
    fn into_data(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(FolioError::api(
                200,
                self.message
                    .unwrap_or_else(|| "Backend reported failure".to_string()),
            )),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeData {
    is_liked: bool,
}

#[derive(Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl CommentGateway for ApiClient {
    async fn comments_for(&self, blog_id: &str) -> Result<Vec<Comment>> {
        let response = self
            .http()
            .get(self.url(&format!("/api/comments/{}", blog_id)))
            .send()
            .await?;

        let envelope: Envelope<Vec<Comment>> = self.parse(response).await?;
        envelope.into_data()
    }

    async fn post_comment(
        &self,
        blog_id: &str,
        content: &str,
        parent_comment_id: Option<&str>,
    ) -> Result<Comment> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .post(self.url(&format!("/api/comments/{}", blog_id)))
            .bearer_auth(token)
            .json(&PostCommentRequest {
                content,
                parent_comment_id,
            })
            .send()
            .await?;

        let envelope: Envelope<Comment> = self.parse(response).await?;
        envelope.into_data()
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .delete(self.url(&format!("/api/comments/{}", comment_id)))
            .bearer_auth(token)
            .send()
            .await?;

        let delete: DeleteResponse = self.parse(response).await?;
        if delete.success {
            Ok(())
        } else {
            Err(FolioError::api(
                200,
                delete
                    .message
                    .unwrap_or_else(|| "Failed to delete comment".to_string()),
            ))
        }
    }

    async fn toggle_comment_like(&self, comment_id: &str) -> Result<bool> {
        let token = self.bearer_token()?;
        let response = self
            .http()
            .post(self.url(&format!("/api/comments/like/{}", comment_id)))
            .bearer_auth(token)
            .send()
            .await?;

        let envelope: Envelope<LikeData> = self.parse(response).await?;
        Ok(envelope.into_data()?.is_liked)
    }
}
