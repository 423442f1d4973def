//! In-memory doubles for exercising the use cases without a backend.

use crate::session_store::SessionStore;
use async_trait::async_trait;
use chrono::Utc;
use folio_core::blog::{
    Blog, BlogAuthor, BlogDraft, BlogGateway, BlogUpdate, FavouriteState, LoveState, Reactions,
};
use folio_core::comment::{Comment, CommentAuthor, CommentGateway};
use folio_core::error::{FolioError, Result};
use folio_core::session::{
    AuthGateway, AuthSession, CredentialRepository, RegisterRequest, SessionCredentials,
};
use folio_core::user::{AuthorProfile, OwnProfile, ProfileGateway, ProfileUpdate, User};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Credential repository backed by a mutex, for session store tests.
#[derive(Default)]
pub struct MemoryCredentialRepository {
    stored: Mutex<Option<SessionCredentials>>,
}

impl MemoryCredentialRepository {
    pub fn stored(&self) -> Option<SessionCredentials> {
        self.stored.lock().unwrap().clone()
    }
}

impl CredentialRepository for MemoryCredentialRepository {
    fn load(&self) -> Result<Option<SessionCredentials>> {
        Ok(self.stored())
    }

    fn save(&self, credentials: &SessionCredentials) -> Result<()> {
        *self.stored.lock().unwrap() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

/// A fresh session store over a memory repository.
pub fn session_store() -> (Arc<SessionStore>, Arc<MemoryCredentialRepository>) {
    let repository = Arc::new(MemoryCredentialRepository::default());
    (
        Arc::new(SessionStore::new(repository.clone())),
        repository,
    )
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: "jdoe".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@example.com".to_string(),
        bio: String::new(),
    }
}

pub fn comment(id: &str, parent: Option<&str>) -> Comment {
    Comment {
        id: id.to_string(),
        blog_id: "b1".to_string(),
        author: CommentAuthor {
            id: "user-1".to_string(),
            username: "jdoe".to_string(),
            first_name: None,
            last_name: None,
        },
        content: format!("comment {}", id),
        parent_comment_id: parent.map(|p| p.to_string()),
        likes: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        is_edited: false,
        edited_at: None,
    }
}

pub fn blog(id: &str, title: &str, content: &str, first_name: &str, last_name: &str) -> Blog {
    Blog {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        image: None,
        author: BlogAuthor {
            id: "user-1".to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        },
        created_at: Utc::now(),
        reactions: Reactions::default(),
        loved_by: Vec::new(),
        favourited_by: Vec::new(),
    }
}

// ============================================================================
// Auth
// ============================================================================

pub struct StubAuthGateway {
    token: String,
    user: Option<User>,
    calls: AtomicUsize,
}

impl StubAuthGateway {
    /// Responds with both token and user, like the login endpoint.
    pub fn succeeding(token: &str, user: User) -> Self {
        Self {
            token: token.to_string(),
            user: Some(user),
            calls: AtomicUsize::new(0),
        }
    }

    /// Responds with only a token, like a terse registration endpoint.
    pub fn token_only(token: &str) -> Self {
        Self {
            token: token.to_string(),
            user: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGateway for StubAuthGateway {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthSession> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AuthSession {
            token: self.token.clone(),
            user: self.user.clone(),
        })
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthSession> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AuthSession {
            token: self.token.clone(),
            user: self.user.clone(),
        })
    }
}

// ============================================================================
// Comments
// ============================================================================

pub struct StubCommentGateway {
    comments: Vec<Comment>,
    created: AtomicUsize,
    calls: AtomicUsize,
}

impl StubCommentGateway {
    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            created: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn confirmed(&self, blog_id: &str, content: &str, parent: Option<&str>) -> Comment {
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        let mut created = comment(&format!("created-{}", n), parent);
        created.blog_id = blog_id.to_string();
        created.content = content.to_string();
        created
    }
}

#[async_trait]
impl CommentGateway for StubCommentGateway {
    async fn comments_for(&self, _blog_id: &str) -> Result<Vec<Comment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.comments.clone())
    }

    async fn post_comment(
        &self,
        blog_id: &str,
        content: &str,
        parent_comment_id: Option<&str>,
    ) -> Result<Comment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.confirmed(blog_id, content, parent_comment_id))
    }

    async fn delete_comment(&self, _comment_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn toggle_comment_like(&self, _comment_id: &str) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// Gateway whose mutations block until released, for exercising in-flight
/// guards and stale-response discard.
pub struct StallingCommentGateway {
    comments: Vec<Comment>,
    created: AtomicUsize,
    /// Notified when a stalled call has started.
    pub entered: Notify,
    /// Notify to let the stalled call finish.
    pub release: Notify,
}

impl StallingCommentGateway {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            created: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    async fn stall(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl CommentGateway for StallingCommentGateway {
    async fn comments_for(&self, _blog_id: &str) -> Result<Vec<Comment>> {
        Ok(self.comments.clone())
    }

    async fn post_comment(
        &self,
        blog_id: &str,
        content: &str,
        parent_comment_id: Option<&str>,
    ) -> Result<Comment> {
        self.stall().await;
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        let mut created = comment(&format!("created-{}", n), parent_comment_id);
        created.blog_id = blog_id.to_string();
        created.content = content.to_string();
        Ok(created)
    }

    async fn delete_comment(&self, _comment_id: &str) -> Result<()> {
        self.stall().await;
        Ok(())
    }

    async fn toggle_comment_like(&self, _comment_id: &str) -> Result<bool> {
        self.stall().await;
        Ok(true)
    }
}

// ============================================================================
// Blogs
// ============================================================================

#[derive(Default)]
pub struct StubBlogGateway {
    reject_auth: bool,
    calls: AtomicUsize,
}

impl StubBlogGateway {
    /// Every authenticated call answers 401, as with an expired token.
    pub fn rejecting_auth() -> Self {
        Self {
            reject_auth: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn guard(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_auth {
            Err(FolioError::Unauthorized)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BlogGateway for StubBlogGateway {
    async fn all_blogs(&self) -> Result<Vec<Blog>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn blog(&self, blog_id: &str) -> Result<Blog> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(blog(blog_id, "title", "content", "Jane", "Doe"))
    }

    async fn create_blog(&self, _draft: &BlogDraft) -> Result<Option<Blog>> {
        self.guard()?;
        Ok(None)
    }

    async fn update_blog(&self, blog_id: &str, update: &BlogUpdate) -> Result<Blog> {
        self.guard()?;
        Ok(blog(blog_id, &update.title, &update.content, "Jane", "Doe"))
    }

    async fn delete_blog(&self, _blog_id: &str) -> Result<()> {
        self.guard()
    }

    async fn toggle_love(&self, _blog_id: &str) -> Result<LoveState> {
        self.guard()?;
        Ok(LoveState {
            loved_by_user: true,
            total_lovers: 1,
        })
    }

    async fn toggle_favourite(&self, _blog_id: &str) -> Result<FavouriteState> {
        self.guard()?;
        Ok(FavouriteState {
            is_favourited: true,
            favourited_by: vec!["user-1".to_string()],
        })
    }

    async fn favourite_blogs(&self) -> Result<Vec<Blog>> {
        self.guard()?;
        Ok(Vec::new())
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Default)]
pub struct StubProfileGateway {
    reject_auth: bool,
}

impl StubProfileGateway {
    pub fn rejecting_auth() -> Self {
        Self { reject_auth: true }
    }

    fn guard(&self) -> Result<()> {
        if self.reject_auth {
            Err(FolioError::Unauthorized)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProfileGateway for StubProfileGateway {
    async fn my_profile(&self) -> Result<OwnProfile> {
        self.guard()?;
        Ok(OwnProfile {
            user: user("user-1"),
            blogs: Vec::new(),
        })
    }

    async fn author_profile(&self, user_id: &str) -> Result<AuthorProfile> {
        Ok(AuthorProfile {
            user: user(user_id),
            blogs: Vec::new(),
        })
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.guard()?;
        let mut updated = user("user-1");
        updated.first_name = update.first_name.clone();
        updated.last_name = update.last_name.clone();
        updated.bio = update.bio.clone();
        Ok(updated)
    }
}
