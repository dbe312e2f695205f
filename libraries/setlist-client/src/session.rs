//! Session token lifecycle.
//!
//! [`SessionStore`] is the single owner of the credential. It is created once
//! at startup and handed to every component that needs it (`Arc<SessionStore>`);
//! the access gate and the request authorizer only ever read from it.
//!
//! Two states: Anonymous (no token stored) and Authenticated. `authenticate`
//! moves to Authenticated on success, `clear` moves back; a failed
//! `authenticate` leaves the state as it was.

use crate::auth::AuthClient;
use crate::client::build_http_client;
use crate::error::Result;
use crate::storage::TokenStorage;
use crate::types::ClientConfig;
use reqwest::Client;
use setlist_core::{Credential, Credentials};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Owner of the session credential and its persistence.
pub struct SessionStore {
    http: Client,
    config: ClientConfig,
    login_url: Url,
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    /// Create a session store for the server in `config`.
    pub fn new(config: &ClientConfig, storage: Arc<dyn TokenStorage>) -> Result<Self> {
        let config = config.normalized()?;
        Ok(Self {
            http: build_http_client()?,
            login_url: config.login_url()?,
            config,
            storage,
        })
    }

    /// Normalized server configuration every client of this session talks to.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of the authentication endpoint.
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Whether a stored token can ever be read back.
    pub fn storage_available(&self) -> bool {
        self.storage.is_available()
    }

    /// Exchange credentials for a token and store it.
    ///
    /// On any failure nothing is stored and the previous state is kept.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Credential> {
        let response = AuthClient::new(&self.http, &self.login_url)
            .login(credentials)
            .await?;

        self.storage.store(&response.token)?;
        if !self.storage.is_available() {
            warn!("Token storage unavailable, session will report as anonymous");
        }

        Ok(Credential::new(response.token))
    }

    /// The stored token, if storage is available and holds one.
    pub fn current_token(&self) -> Option<String> {
        if !self.storage.is_available() {
            return None;
        }
        self.storage.load().filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    /// Forget the stored token (logout). Safe to call when already anonymous.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove()?;
        info!("Logged out");
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("login_url", &self.login_url.as_str())
            .field("storage_available", &self.storage.is_available())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
