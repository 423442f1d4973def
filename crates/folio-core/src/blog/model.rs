//! Article records and mutation payloads.

use crate::error::{FolioError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The user who wrote an article, as embedded in the article record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogAuthor {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl BlogAuthor {
    /// Full display name of the author.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Aggregated reaction counters carried on an article record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    #[serde(default)]
    pub love: u64,
}

/// A published article.
///
/// Older backend records carried the favourite membership under a
/// `favourites` key; newer ones use `favouritedBy`. Both decode into the
/// same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    /// Server-side image filename, or an absolute URL.
    #[serde(default)]
    pub image: Option<String>,
    pub author: BlogAuthor,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reactions: Reactions,
    /// User ids that reacted with love.
    #[serde(default)]
    pub loved_by: Vec<String>,
    /// User ids that favourited this article.
    #[serde(default, alias = "favourites")]
    pub favourited_by: Vec<String>,
}

impl Blog {
    /// Returns true if `user_id` has loved this article.
    pub fn is_loved_by(&self, user_id: &str) -> bool {
        self.loved_by.iter().any(|id| id == user_id)
    }

    /// Returns true if `user_id` has favourited this article.
    pub fn is_favourited_by(&self, user_id: &str) -> bool {
        self.favourited_by.iter().any(|id| id == user_id)
    }

    /// Resolves the image to a fetchable URL, if any.
    ///
    /// Absolute URLs pass through; bare filenames resolve against the
    /// backend's uploads path.
    pub fn image_url(&self, base_url: &str) -> Option<String> {
        let image = self.image.as_deref()?;
        if image.starts_with("http") {
            Some(image.to_string())
        } else {
            Some(format!("{}/uploads/{}", base_url.trim_end_matches('/'), image))
        }
    }

    /// Case-insensitive match against title, content, and author name.
    ///
    /// This is the client-side search used by the article list; an empty
    /// query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
            || self.author.display_name().to_lowercase().contains(&query)
    }
}

/// A new article to publish, with an optional local image to upload.
#[derive(Debug, Clone)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub image: Option<PathBuf>,
}

/// Edit payload for an existing article.
///
/// `image` carries the already-uploaded server-side value; editing never
/// re-uploads.
#[derive(Debug, Clone, Serialize)]
pub struct BlogUpdate {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

/// Confirmed love-reaction state returned by the backend toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveState {
    pub loved_by_user: bool,
    pub total_lovers: u64,
}

/// Confirmed favourite state returned by the backend toggle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteState {
    pub is_favourited: bool,
    #[serde(default)]
    pub favourited_by: Vec<String>,
}

/// Validates a draft before dispatch.
pub fn validate_blog_draft(draft: &BlogDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(FolioError::validation("Title cannot be empty"));
    }
    if draft.content.trim().is_empty() {
        return Err(FolioError::validation("Content cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog() -> Blog {
        Blog {
            id: "b1".to_string(),
            title: "Rust for the curious".to_string(),
            content: "A tour of ownership.".to_string(),
            image: None,
            author: BlogAuthor {
                id: "user-1".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
            created_at: Utc::now(),
            reactions: Reactions { love: 2 },
            loved_by: vec!["user-2".to_string(), "user-3".to_string()],
            favourited_by: vec!["user-2".to_string()],
        }
    }

    #[test]
    fn test_membership_checks() {
        let blog = blog();
        assert!(blog.is_loved_by("user-2"));
        assert!(!blog.is_loved_by("user-9"));
        assert!(blog.is_favourited_by("user-2"));
        assert!(!blog.is_favourited_by("user-3"));
    }

    #[test]
    fn test_image_url_resolution() {
        let mut blog = blog();
        assert_eq!(blog.image_url("http://localhost:3001"), None);

        blog.image = Some("photo.png".to_string());
        assert_eq!(
            blog.image_url("http://localhost:3001/"),
            Some("http://localhost:3001/uploads/photo.png".to_string())
        );

        blog.image = Some("https://cdn.example.com/photo.png".to_string());
        assert_eq!(
            blog.image_url("http://localhost:3001"),
            Some("https://cdn.example.com/photo.png".to_string())
        );
    }

    #[test]
    fn test_matches_query_on_title_content_and_author() {
        let blog = blog();
        assert!(blog.matches_query("CURIOUS"));
        assert!(blog.matches_query("ownership"));
        assert!(blog.matches_query("jane doe"));
        assert!(blog.matches_query("  "));
        assert!(!blog.matches_query("gardening"));
    }

    #[test]
    fn test_validate_blog_draft() {
        let draft = BlogDraft {
            title: " ".to_string(),
            content: "body".to_string(),
            image: None,
        };
        assert!(validate_blog_draft(&draft).is_err());

        let draft = BlogDraft {
            title: "title".to_string(),
            content: "body".to_string(),
            image: None,
        };
        assert!(validate_blog_draft(&draft).is_ok());
    }

    #[test]
    fn test_decodes_backend_wire_shape_with_favourites_alias() {
        let json = r#"{
            "_id": "b1",
            "title": "Hello",
            "content": "World",
            "image": "photo.png",
            "author": { "_id": "user-1", "firstName": "Jane", "lastName": "Doe" },
            "createdAt": "2024-05-01T12:00:00.000Z",
            "reactions": { "love": 3 },
            "lovedBy": ["user-2"],
            "favourites": ["user-2", "user-3"]
        }"#;

        let blog: Blog = serde_json::from_str(json).unwrap();
        assert_eq!(blog.reactions.love, 3);
        assert_eq!(blog.favourited_by.len(), 2);
        assert!(blog.is_loved_by("user-2"));
    }
}
