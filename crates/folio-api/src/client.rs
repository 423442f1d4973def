//! The shared HTTP client and response handling.

use crate::config::ApiConfig;
use folio_core::error::{FolioError, Result};
use folio_core::session::TokenSource;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// REST client for the Folio backend.
///
/// One instance is shared across all use cases; it holds the connection
/// pool, the base URL, and the token seam for authenticated requests.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL and timeouts
    /// * `tokens` - Source of the current bearer token (the session store)
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            http,
            tokens,
        })
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Joins an endpoint path onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Returns the current bearer token, or rejects locally when no session
    /// is established. No request leaves the client without a token for
    /// authenticated endpoints.
    pub(crate) fn bearer_token(&self) -> Result<String> {
        match self.tokens.token() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(FolioError::AuthRequired),
        }
    }

    /// Decodes a successful response body, or maps the failure status.
    pub(crate) async fn parse<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    /// Discards the body of a successful response, or maps the failure
    /// status.
    pub(crate) async fn expect_success(&self, response: Response) -> Result<()> {
        self.check(response).await.map(|_| ())
    }

    async fn check(&self, response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::error_from_response(response).await)
    }

    /// Maps a non-success response to a typed error, extracting the
    /// backend's `message`/`error` body field when parseable.
    async fn error_from_response(response: Response) -> FolioError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        tracing::debug!(status = status.as_u16(), %message, "Backend rejected request");

        match status {
            StatusCode::UNAUTHORIZED => FolioError::Unauthorized,
            _ => FolioError::api(status.as_u16(), message),
        }
    }
}

/// Error body shape used across the backend: some endpoints report
/// `message`, a few report `error`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSession;

    impl TokenSource for NoSession {
        fn token(&self) -> Option<String> {
            None
        }
        fn user_id(&self) -> Option<String> {
            None
        }
    }

    struct FixedToken;

    impl TokenSource for FixedToken {
        fn token(&self) -> Option<String> {
            Some("jwt-abc".to_string())
        }
        fn user_id(&self) -> Option<String> {
            Some("user-1".to_string())
        }
    }

    #[test]
    fn test_bearer_token_rejected_locally_without_session() {
        let client = ApiClient::new(ApiConfig::default(), Arc::new(NoSession)).unwrap();
        assert!(client.bearer_token().unwrap_err().is_auth_required());
    }

    #[test]
    fn test_bearer_token_returned_when_present() {
        let client = ApiClient::new(ApiConfig::default(), Arc::new(FixedToken)).unwrap();
        assert_eq!(client.bearer_token().unwrap(), "jwt-abc");
    }

    #[test]
    fn test_url_join_handles_trailing_slash() {
        let config = ApiConfig::default().with_base_url("http://localhost:3001/");
        let client = ApiClient::new(config, Arc::new(NoSession)).unwrap();
        assert_eq!(client.url("/blog/all"), "http://localhost:3001/blog/all");
    }

    #[test]
    fn test_error_body_prefers_message_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("nope"));

        let body: ErrorBody = serde_json::from_str(r#"{"error": "denied"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("denied"));
    }
}
