//! Flat comment record as delivered by the backend.

use crate::error::{FolioError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on comment content length, enforced before dispatch.
pub const MAX_COMMENT_CONTENT_LEN: usize = 1000;

/// The user who wrote a comment, as embedded in the comment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl CommentAuthor {
    /// The name shown next to a comment: full name when both parts are
    /// present, otherwise the username, otherwise a placeholder.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ if !self.username.is_empty() => self.username.clone(),
            _ => "Anonymous".to_string(),
        }
    }
}

/// A single comment as fetched from the backend.
///
/// Records arrive as a flat, newest-first list; the reply hierarchy is
/// encoded solely in `parent_comment_id` and materialized by
/// [`CommentForest`](super::CommentForest). Likes store membership, not a
/// counter, so the displayed count can never drift from the underlying set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub blog_id: String,
    /// The backend embeds the author record under the `userId` key.
    #[serde(rename = "userId")]
    pub author: CommentAuthor,
    pub content: String,
    /// `None` marks a top-level comment.
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    /// User ids that liked this comment.
    #[serde(default)]
    pub likes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Returns true if `user_id` is in this comment's like set.
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    /// Derived like count; always the size of the like set.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Toggles `user_id`'s membership in the like set.
    ///
    /// # Returns
    ///
    /// `true` if the user now likes the comment, `false` if the like was
    /// removed. Applying this twice with the same user restores the
    /// original set.
    pub fn toggle_like(&mut self, user_id: &str) -> bool {
        if let Some(index) = self.likes.iter().position(|id| id == user_id) {
            self.likes.remove(index);
            false
        } else {
            self.likes.push(user_id.to_string());
            true
        }
    }

    /// Sets `user_id`'s membership in the like set to a confirmed value.
    ///
    /// Idempotent; used to apply the backend's response rather than an
    /// optimistic local guess.
    pub fn set_liked(&mut self, user_id: &str, liked: bool) {
        let position = self.likes.iter().position(|id| id == user_id);
        match (position, liked) {
            (None, true) => self.likes.push(user_id.to_string()),
            (Some(index), false) => {
                self.likes.remove(index);
            }
            _ => {}
        }
    }
}

/// Validates comment content before dispatch.
///
/// Rejects empty (or whitespace-only) content and content exceeding
/// [`MAX_COMMENT_CONTENT_LEN`] characters.
pub fn validate_comment_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(FolioError::validation("Comment cannot be empty"));
    }
    if content.chars().count() > MAX_COMMENT_CONTENT_LEN {
        return Err(FolioError::validation(format!(
            "Comment cannot exceed {} characters",
            MAX_COMMENT_CONTENT_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> CommentAuthor {
        CommentAuthor {
            id: "user-1".to_string(),
            username: "jdoe".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(author().display_name(), "Jane Doe");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut author = author();
        author.first_name = None;
        assert_eq!(author.display_name(), "jdoe");
    }

    #[test]
    fn test_display_name_placeholder_when_nothing_known() {
        let author = CommentAuthor {
            id: "user-1".to_string(),
            username: String::new(),
            first_name: None,
            last_name: None,
        };
        assert_eq!(author.display_name(), "Anonymous");
    }

    #[test]
    fn test_toggle_like_is_self_inverse() {
        let mut comment = sample_comment();
        let original = comment.likes.clone();

        assert!(comment.toggle_like("user-9"));
        assert!(comment.is_liked_by("user-9"));
        assert!(!comment.toggle_like("user-9"));
        assert_eq!(comment.likes, original);
    }

    #[test]
    fn test_set_liked_is_idempotent() {
        let mut comment = sample_comment();

        comment.set_liked("user-9", true);
        comment.set_liked("user-9", true);
        assert_eq!(comment.like_count(), 1);

        comment.set_liked("user-9", false);
        comment.set_liked("user-9", false);
        assert_eq!(comment.like_count(), 0);
    }

    #[test]
    fn test_validate_rejects_empty_content() {
        assert!(validate_comment_content("   ").is_err());
    }

    #[test]
    fn test_validate_rejects_overlong_content() {
        let content = "x".repeat(MAX_COMMENT_CONTENT_LEN + 1);
        assert!(validate_comment_content(&content).is_err());
    }

    #[test]
    fn test_validate_accepts_boundary_content() {
        let content = "x".repeat(MAX_COMMENT_CONTENT_LEN);
        assert!(validate_comment_content(&content).is_ok());
    }

    #[test]
    fn test_decodes_backend_wire_shape() {
        let json = r#"{
            "_id": "c1",
            "blogId": "b1",
            "userId": {
                "_id": "user-1",
                "username": "jdoe",
                "firstName": "Jane",
                "lastName": "Doe"
            },
            "content": "First!",
            "parentCommentId": null,
            "likes": ["user-2"],
            "createdAt": "2024-05-01T12:00:00.000Z",
            "updatedAt": "2024-05-01T12:00:00.000Z",
            "isEdited": false
        }"#;

        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.blog_id, "b1");
        assert_eq!(comment.author.display_name(), "Jane Doe");
        assert!(comment.parent_comment_id.is_none());
        assert_eq!(comment.like_count(), 1);
        assert!(!comment.is_edited);
        assert!(comment.edited_at.is_none());
    }

    fn sample_comment() -> Comment {
        Comment {
            id: "c1".to_string(),
            blog_id: "b1".to_string(),
            author: author(),
            content: "hello".to_string(),
            parent_comment_id: None,
            likes: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_edited: false,
            edited_at: None,
        }
    }
}
