//! Authentication endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use folio_core::error::Result;
use folio_core::session::{AuthGateway, AuthSession, RegisterRequest};
use folio_core::user::User;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Login always carries the user; registration may return only the token.
#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    #[serde(default)]
    user: Option<User>,
}

impl From<AuthResponse> for AuthSession {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let response = self
            .http()
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let auth: AuthResponse = self.parse(response).await?;
        Ok(auth.into())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession> {
        let response = self
            .http()
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await?;

        let auth: AuthResponse = self.parse(response).await?;
        Ok(auth.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_login_response() {
        let json = r#"{
            "token": "jwt-abc",
            "user": { "_id": "user-1", "firstName": "Jane", "lastName": "Doe", "email": "jane@example.com" }
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        let session = AuthSession::from(response);
        assert_eq!(session.token, "jwt-abc");
        assert_eq!(session.user.unwrap().id, "user-1");
    }

    #[test]
    fn test_decodes_token_only_registration_response() {
        let response: AuthResponse = serde_json::from_str(r#"{"token": "jwt-abc"}"#).unwrap();
        let session = AuthSession::from(response);
        assert_eq!(session.token, "jwt-abc");
        assert!(session.user.is_none());
    }

    #[test]
    fn test_register_request_serializes_camel_case() {
        let request = RegisterRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("lastName").is_some());
        assert!(json.get("first_name").is_none());
    }
}
