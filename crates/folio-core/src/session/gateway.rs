//! Backend authentication gateway trait.

use super::model::{AuthSession, RegisterRequest};
use crate::error::Result;
use async_trait::async_trait;

/// Gateway to the backend's authentication endpoints.
///
/// Implemented by the REST client; use cases depend on this trait so they
/// can be exercised with in-memory doubles.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges an email/password pair for a session.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Registers a new account.
    ///
    /// The backend may or may not return a user alongside the token; see
    /// [`AuthSession`].
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession>;
}
