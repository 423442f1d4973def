//! Comment thread management for the article being viewed.
//!
//! Owns the active article's comment forest and applies incremental
//! updates. All mutations wait for backend confirmation before touching
//! local state, per-comment mutations are serialized by an in-flight
//! guard, and responses that arrive after the thread was closed (the user
//! navigated away) are discarded rather than applied to stale state.

use crate::session_store::SessionStore;
use crate::support::surface_failure;
use folio_core::comment::{
    Comment, CommentForest, CommentGateway, ReplyPlacement, validate_comment_content,
};
use folio_core::error::{FolioError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

struct ActiveThread {
    blog_id: String,
    forest: CommentForest,
}

/// Use case for the threaded comment section of one article at a time.
pub struct CommentUseCase {
    gateway: Arc<dyn CommentGateway>,
    session: Arc<SessionStore>,
    thread: RwLock<Option<ActiveThread>>,
    pending_likes: Mutex<HashSet<String>>,
}

impl CommentUseCase {
    pub fn new(gateway: Arc<dyn CommentGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            thread: RwLock::new(None),
            pending_likes: Mutex::new(HashSet::new()),
        }
    }

    /// Opens the comment thread for an article: fetches the flat list once
    /// and builds the reply forest.
    ///
    /// # Returns
    ///
    /// The number of comments in the thread.
    pub async fn open(&self, blog_id: &str) -> Result<usize> {
        let flat = self.gateway.comments_for(blog_id).await?;
        let forest = CommentForest::build(flat);
        let count = forest.len();

        let mut thread = self.thread.write().await;
        *thread = Some(ActiveThread {
            blog_id: blog_id.to_string(),
            forest,
        });
        Ok(count)
    }

    /// Closes the thread. In-flight responses for it will be discarded.
    pub async fn close(&self) {
        let mut thread = self.thread.write().await;
        *thread = None;
    }

    /// The article whose thread is open, if any.
    pub async fn open_blog_id(&self) -> Option<String> {
        let thread = self.thread.read().await;
        thread.as_ref().map(|t| t.blog_id.clone())
    }

    /// A snapshot of the current forest for rendering.
    pub async fn forest(&self) -> Option<CommentForest> {
        let thread = self.thread.read().await;
        thread.as_ref().map(|t| t.forest.clone())
    }

    /// Posts a comment (or a reply, when `parent_id` is set) to the open
    /// thread.
    ///
    /// Content is validated before dispatch; the confirmed comment is
    /// inserted into the forest only if the same thread is still open when
    /// the response lands.
    pub async fn post(&self, content: &str, parent_id: Option<&str>) -> Result<Comment> {
        validate_comment_content(content)?;
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        let blog_id = self
            .open_blog_id()
            .await
            .ok_or_else(|| FolioError::internal("No comment thread is open"))?;

        let created = self
            .gateway
            .post_comment(&blog_id, content.trim(), parent_id)
            .await
            .map_err(|err| surface_failure(&self.session, err))?;

        let mut thread = self.thread.write().await;
        match thread.as_mut() {
            Some(active) if active.blog_id == blog_id => {
                let placement = active.forest.insert_reply(created.clone(), parent_id);
                if placement == ReplyPlacement::Orphaned {
                    tracing::warn!(
                        comment_id = %created.id,
                        parent_id = ?parent_id,
                        "Reply parent not found, surfacing comment top-level"
                    );
                }
            }
            _ => {
                tracing::debug!(comment_id = %created.id, "Thread closed, discarding response");
            }
        }
        Ok(created)
    }

    /// Deletes a comment; the backend cascades to replies and so does the
    /// local forest.
    pub async fn delete(&self, comment_id: &str) -> Result<()> {
        if !self.session.is_authenticated() {
            return Err(FolioError::AuthRequired);
        }

        self.gateway
            .delete_comment(comment_id)
            .await
            .map_err(|err| surface_failure(&self.session, err))?;

        let mut thread = self.thread.write().await;
        if let Some(active) = thread.as_mut() {
            active.forest.remove(comment_id);
        }
        Ok(())
    }

    /// Toggles the current user's like on a comment.
    ///
    /// Mutations are serialized per comment id: while a toggle for an id is
    /// outstanding, further toggles for the same id are rejected (the view
    /// disables the control via [`CommentUseCase::is_like_pending`]). The
    /// confirmed state from the backend is applied, never a local guess.
    ///
    /// # Returns
    ///
    /// The confirmed membership: `true` if the user now likes the comment.
    pub async fn toggle_like(&self, comment_id: &str) -> Result<bool> {
        let user_id = self.session.user_id().filter(|_| self.session.is_authenticated());
        let user_id = match user_id {
            Some(user_id) => user_id,
            None => return Err(FolioError::AuthRequired),
        };

        {
            let mut pending = self.pending_likes.lock().await;
            if !pending.insert(comment_id.to_string()) {
                return Err(FolioError::validation(
                    "A like for this comment is already in flight",
                ));
            }
        }

        let result = self.gateway.toggle_comment_like(comment_id).await;

        {
            let mut pending = self.pending_likes.lock().await;
            pending.remove(comment_id);
        }

        let is_liked = result.map_err(|err| surface_failure(&self.session, err))?;

        let mut thread = self.thread.write().await;
        if let Some(active) = thread.as_mut() {
            active.forest.set_liked(comment_id, &user_id, is_liked);
        }
        Ok(is_liked)
    }

    /// True while a like toggle for this comment is outstanding.
    pub async fn is_like_pending(&self, comment_id: &str) -> bool {
        let pending = self.pending_likes.lock().await;
        pending.contains(comment_id)
    }
}
