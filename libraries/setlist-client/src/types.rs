//! Types for Setlist API requests and responses.

use crate::error::{ClientError, Result};
use serde::Deserialize;
use url::Url;

/// Path of the authentication endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Configuration for connecting to a catalog server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "http://localhost:8080")
    pub url: String,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Validate the base URL and strip trailing slashes.
    pub fn normalized(&self) -> Result<Self> {
        if self.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = self.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(Self { url })
    }

    /// Absolute URL for an API path such as `/api/songs`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.url.trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path)).map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    pub fn login_url(&self) -> Result<Url> {
        self.endpoint(LOGIN_PATH)
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Response from successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body some endpoints return alongside a failure status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiError {
    /// Best human-readable text for a failed response body.
    pub(crate) fn describe(body: &str) -> String {
        match serde_json::from_str::<ApiError>(body) {
            Ok(ApiError {
                message: Some(message),
                ..
            }) => message,
            Ok(ApiError {
                error: Some(error), ..
            }) => error,
            _ => body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_trailing_slashes() {
        let config = ClientConfig::new("http://localhost:8080///").normalized().unwrap();
        assert_eq!(config.url, "http://localhost:8080");
        assert_eq!(
            config.login_url().unwrap().as_str(),
            "http://localhost:8080/api/auth/login"
        );
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(ClientConfig::new("").normalized().is_err());
        assert!(ClientConfig::new("localhost:8080").normalized().is_err());
        assert!(ClientConfig::new("ftp://example.com").normalized().is_err());
    }

    #[test]
    fn api_error_prefers_message() {
        assert_eq!(
            ApiError::describe(r#"{"error":"not_found","message":"Playlist 3 not found"}"#),
            "Playlist 3 not found"
        );
        assert_eq!(ApiError::describe(r#"{"error":"bad_request"}"#), "bad_request");
        assert_eq!(ApiError::describe("Internal Server Error"), "Internal Server Error");
    }
}
