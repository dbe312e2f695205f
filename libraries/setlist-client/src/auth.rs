//! Authentication call against the catalog server.

use crate::error::{ClientError, Result};
use crate::types::{ApiError, LoginResponse};
use reqwest::{Client, StatusCode};
use setlist_core::Credentials;
use tracing::{debug, info, warn};
use url::Url;

/// Authentication client for the catalog server.
pub struct AuthClient<'a> {
    http: &'a Client,
    login_url: &'a Url,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, login_url: &'a Url) -> Self {
        Self { http, login_url }
    }

    /// Login with username and password.
    ///
    /// The request never carries an `Authorization` header.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!(url = %self.login_url, username = %credentials.username, "Attempting login");

        let response = self
            .http
            .post(self.login_url.clone())
            .json(credentials)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let login_response: LoginResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse login response: {}", e))
            })?;

            if login_response.token.is_empty() {
                return Err(ClientError::ParseError(
                    "Login response contained an empty token".to_string(),
                ));
            }

            info!(username = %credentials.username, "Login successful");
            Ok(login_response)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = %status, "Login failed: invalid credentials");
            Err(ClientError::InvalidCredentials)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: ApiError::describe(&error_text),
            })
        }
    }
}
