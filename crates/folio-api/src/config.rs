//! API client configuration.

use std::env;
use std::time::Duration;

/// Fallback backend URL used when no environment override is present.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment.
    ///
    /// Priority:
    /// 1. `FOLIO_API_URL` environment variable
    /// 2. [`DEFAULT_BASE_URL`]
    pub fn from_env() -> Self {
        let base_url = env::var("FOLIO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Overrides the base URL after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_with_base_url_overrides() {
        let config = ApiConfig::default().with_base_url("https://api.example.com");
        assert_eq!(config.base_url, "https://api.example.com");
    }
}
