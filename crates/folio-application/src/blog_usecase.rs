//! Article browsing, publishing, and reactions.

use crate::session_store::SessionStore;
use crate::support::surface_failure;
use folio_core::blog::{
    Blog, BlogDraft, BlogGateway, BlogUpdate, FavouriteState, LoveState, validate_blog_draft,
};
use folio_core::error::{FolioError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Use case for the article list and a single article's actions.
///
/// Love and favourite toggles are serialized per article id, mirroring the
/// comment-like guard: while a toggle is outstanding the control is
/// disabled and further requests for the same id are rejected.
pub struct BlogUseCase {
    gateway: Arc<dyn BlogGateway>,
    session: Arc<SessionStore>,
    pending_loves: Mutex<HashSet<String>>,
    pending_favourites: Mutex<HashSet<String>>,
}

impl BlogUseCase {
    pub fn new(gateway: Arc<dyn BlogGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            pending_loves: Mutex::new(HashSet::new()),
            pending_favourites: Mutex::new(HashSet::new()),
        }
    }

    /// Fetches every published article.
    pub async fn list(&self) -> Result<Vec<Blog>> {
        self.gateway.all_blogs().await
    }

    /// Client-side search over an already-fetched list: case-insensitive
    /// match on title, content, and author name. An empty query returns
    /// everything.
    pub fn search<'a>(blogs: &'a [Blog], query: &str) -> Vec<&'a Blog> {
        blogs.iter().filter(|blog| blog.matches_query(query)).collect()
    }

    /// Fetches a single article.
    pub async fn fetch(&self, blog_id: &str) -> Result<Blog> {
        self.gateway.blog(blog_id).await
    }

    /// Publishes a draft after validation, uploading its image when
    /// present. `None` means the backend did not echo the created article
    /// and the list should be refetched.
    pub async fn publish(&self, draft: BlogDraft) -> Result<Option<Blog>> {
        validate_blog_draft(&draft)?;
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        self.gateway
            .create_blog(&draft)
            .await
            .map_err(|err| surface_failure(&self.session, err))
    }

    /// Updates an article and returns the confirmed record.
    pub async fn update(&self, blog_id: &str, update: BlogUpdate) -> Result<Blog> {
        if update.title.trim().is_empty() {
            return Err(FolioError::validation("Title cannot be empty"));
        }
        if update.content.trim().is_empty() {
            return Err(FolioError::validation("Content cannot be empty"));
        }
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        self.gateway
            .update_blog(blog_id, &update)
            .await
            .map_err(|err| surface_failure(&self.session, err))
    }

    /// Deletes an article.
    pub async fn delete(&self, blog_id: &str) -> Result<()> {
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        self.gateway
            .delete_blog(blog_id)
            .await
            .map_err(|err| surface_failure(&self.session, err))
    }

    /// Fetches the current user's favourite articles.
    pub async fn favourites(&self) -> Result<Vec<Blog>> {
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        self.gateway
            .favourite_blogs()
            .await
            .map_err(|err| surface_failure(&self.session, err))
    }

    /// Toggles the love reaction on an article and returns the confirmed
    /// state (membership and total).
    pub async fn toggle_love(&self, blog_id: &str) -> Result<LoveState> {
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        Self::begin(&self.pending_loves, blog_id, "love").await?;
        let result = self.gateway.toggle_love(blog_id).await;
        Self::finish(&self.pending_loves, blog_id).await;

        result.map_err(|err| surface_failure(&self.session, err))
    }

    /// Toggles the favourite on an article and returns the confirmed state.
    pub async fn toggle_favourite(&self, blog_id: &str) -> Result<FavouriteState> {
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        Self::begin(&self.pending_favourites, blog_id, "favourite").await?;
        let result = self.gateway.toggle_favourite(blog_id).await;
        Self::finish(&self.pending_favourites, blog_id).await;

        result.map_err(|err| surface_failure(&self.session, err))
    }

    /// True while a love toggle for this article is outstanding.
    pub async fn is_love_pending(&self, blog_id: &str) -> bool {
        self.pending_loves.lock().await.contains(blog_id)
    }

    /// True while a favourite toggle for this article is outstanding.
    pub async fn is_favourite_pending(&self, blog_id: &str) -> bool {
        self.pending_favourites.lock().await.contains(blog_id)
    }

    async fn begin(pending: &Mutex<HashSet<String>>, blog_id: &str, action: &str) -> Result<()> {
        let mut pending = pending.lock().await;
        if !pending.insert(blog_id.to_string()) {
            return Err(FolioError::validation(format!(
                "A {} toggle for this article is already in flight",
                action
            )));
        }
        Ok(())
    }

    async fn finish(pending: &Mutex<HashSet<String>>, blog_id: &str) {
        let mut pending = pending.lock().await;
        pending.remove(blog_id);
    }
}
