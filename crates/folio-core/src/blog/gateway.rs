//! Backend blog gateway trait.

use super::model::{Blog, BlogDraft, BlogUpdate, FavouriteState, LoveState};
use crate::error::Result;
use async_trait::async_trait;

/// Gateway to the backend's article endpoints.
#[async_trait]
pub trait BlogGateway: Send + Sync {
    /// Fetches every published article.
    async fn all_blogs(&self) -> Result<Vec<Blog>>;

    /// Fetches a single article by id.
    async fn blog(&self, blog_id: &str) -> Result<Blog>;

    /// Publishes a draft, uploading its image when present.
    ///
    /// The backend does not always echo the created article; `None` means
    /// the caller should refetch the list.
    async fn create_blog(&self, draft: &BlogDraft) -> Result<Option<Blog>>;

    /// Updates an article and returns the new record.
    async fn update_blog(&self, blog_id: &str, update: &BlogUpdate) -> Result<Blog>;

    /// Deletes an article.
    async fn delete_blog(&self, blog_id: &str) -> Result<()>;

    /// Toggles the current user's love reaction.
    async fn toggle_love(&self, blog_id: &str) -> Result<LoveState>;

    /// Toggles the current user's favourite.
    async fn toggle_favourite(&self, blog_id: &str) -> Result<FavouriteState>;

    /// Fetches the current user's favourite articles.
    async fn favourite_blogs(&self) -> Result<Vec<Blog>>;
}
