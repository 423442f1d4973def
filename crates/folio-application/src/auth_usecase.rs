//! Login and registration orchestration.

use crate::session_store::SessionStore;
use folio_core::error::{FolioError, Result};
use folio_core::session::{AuthGateway, RegisterRequest};
use folio_core::user::User;
use std::sync::Arc;

/// What happened after a successful registration.
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    /// The backend returned both token and user; the session is established.
    SignedIn(User),
    /// The backend returned only a token. Credentials are not committed
    /// half-formed; the user logs in explicitly.
    LoginRequired,
}

/// Use case for establishing and ending sessions.
pub struct AuthUseCase {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionStore>,
}

impl AuthUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Logs in and commits the confirmed credentials to the session store.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() {
            return Err(FolioError::validation("Email cannot be empty"));
        }
        if password.is_empty() {
            return Err(FolioError::validation("Password cannot be empty"));
        }

        let auth = self.gateway.login(email.trim(), password).await?;
        let user = auth
            .user
            .ok_or_else(|| FolioError::internal("Login response carried no user"))?;

        self.session.set_credentials(auth.token, user.id.clone());
        tracing::info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    /// Registers a new account.
    ///
    /// The session is established only when the response carries both token
    /// and user; otherwise the caller is told to log in.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterOutcome> {
        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(FolioError::validation("Name cannot be empty"));
        }
        if request.email.trim().is_empty() {
            return Err(FolioError::validation("Email cannot be empty"));
        }
        if request.password.is_empty() {
            return Err(FolioError::validation("Password cannot be empty"));
        }

        let auth = self.gateway.register(&request).await?;
        match auth.user {
            Some(user) => {
                self.session.set_credentials(auth.token, user.id.clone());
                tracing::info!(user_id = %user.id, "Registered and logged in");
                Ok(RegisterOutcome::SignedIn(user))
            }
            None => Ok(RegisterOutcome::LoginRequired),
        }
    }

    /// Ends the session, clearing memory and storage.
    pub fn logout(&self) {
        self.session.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubAuthGateway, session_store, user};

    #[tokio::test]
    async fn test_login_commits_credentials() {
        let (session, repository) = session_store();
        let gateway = Arc::new(StubAuthGateway::succeeding("jwt-abc", user("user-1")));
        let usecase = AuthUseCase::new(gateway, session.clone());

        let logged_in = usecase.login("jane@example.com", "hunter2").await.unwrap();

        assert_eq!(logged_in.id, "user-1");
        assert!(session.is_authenticated());
        assert_eq!(
            repository.stored().map(|c| c.token),
            Some("jwt-abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_rejects_empty_email_before_dispatch() {
        let (session, _) = session_store();
        let gateway = Arc::new(StubAuthGateway::succeeding("jwt-abc", user("user-1")));
        let usecase = AuthUseCase::new(gateway.clone(), session);

        let err = usecase.login("  ", "hunter2").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_register_without_user_requires_login() {
        let (session, _) = session_store();
        let gateway = Arc::new(StubAuthGateway::token_only("jwt-abc"));
        let usecase = AuthUseCase::new(gateway, session.clone());

        let outcome = usecase
            .register(RegisterRequest {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();

        assert!(matches!(outcome, RegisterOutcome::LoginRequired));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (session, repository) = session_store();
        session.set_credentials("jwt-abc", "user-1");
        let gateway = Arc::new(StubAuthGateway::token_only("unused"));
        let usecase = AuthUseCase::new(gateway, session.clone());

        usecase.logout();

        assert!(!session.is_authenticated());
        assert!(repository.stored().is_none());
    }
}
