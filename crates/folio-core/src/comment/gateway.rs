//! Backend comment gateway trait.

use super::model::Comment;
use crate::error::Result;
use async_trait::async_trait;

/// Gateway to the backend's comment endpoints.
///
/// All mutating operations return the backend's confirmed state; local
/// state is only updated from these results, never optimistically.
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Fetches the flat comment list for an article, newest first.
    async fn comments_for(&self, blog_id: &str) -> Result<Vec<Comment>>;

    /// Creates a comment (or a reply, when `parent_comment_id` is set) and
    /// returns the created record.
    async fn post_comment(
        &self,
        blog_id: &str,
        content: &str,
        parent_comment_id: Option<&str>,
    ) -> Result<Comment>;

    /// Deletes a comment. The backend cascades the delete to replies.
    async fn delete_comment(&self, comment_id: &str) -> Result<()>;

    /// Toggles the current user's like on a comment.
    ///
    /// # Returns
    ///
    /// The confirmed membership: `true` if the user now likes the comment.
    async fn toggle_comment_like(&self, comment_id: &str) -> Result<bool>;
}
