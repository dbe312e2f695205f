//! Main catalog API client.

use crate::error::{ClientError, Result};
use crate::authorizer::RequestAuthorizer;
use crate::playlists::PlaylistsClient;
use crate::session::SessionStore;
use crate::songs::SongsClient;
use crate::types::{ApiError, ClientConfig};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use setlist_core::{
    CatalogBackend, Credential, Credentials, MembershipUpdateRequest, Playlist, PlaylistId,
    SetlistError, Song,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client with the defaults every Setlist component uses.
///
/// Only the connect phase is bounded; a slow response is waited out.
pub(crate) fn build_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("Setlist/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ClientError::Request)
}

/// Client for the catalog API.
///
/// Every request goes through the [`RequestAuthorizer`], so the credential
/// held by the shared [`SessionStore`] is attached without callers handling
/// tokens themselves.
///
/// # Example
///
/// ```ignore
/// use setlist_client::{ApiClient, ClientConfig, FileTokenStorage, SessionStore};
/// use setlist_core::Credentials;
/// use std::sync::Arc;
///
/// let config = ClientConfig::new("http://localhost:8080");
/// let session = Arc::new(SessionStore::new(
///     &config,
///     Arc::new(FileTokenStorage::new("session.json")),
/// )?);
/// let client = ApiClient::new(Arc::clone(&session));
///
/// client.login(&Credentials::new("user", "password")).await?;
/// let songs = client.songs().list().await?;
/// println!("Found {} songs", songs.len());
/// ```
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
    authorizer: RequestAuthorizer,
}

impl ApiClient {
    /// Create a client sharing `session` with the rest of the application.
    ///
    /// The server is the one the session logs in to, so the token is only
    /// ever sent to the origin that issued it.
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            http: session.http().clone(),
            config: session.config().clone(),
            authorizer: RequestAuthorizer::new(Arc::clone(&session)),
            session,
        }
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Login with username and password; the token is kept by the session.
    pub async fn login(&self, credentials: &Credentials) -> Result<Credential> {
        self.session.authenticate(credentials).await
    }

    /// Clear the stored token.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    /// Song catalog operations.
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(self)
    }

    /// Playlist operations.
    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(self)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.config.endpoint(path)?;
        Ok(self.http.request(method, url))
    }

    /// Build, authorize, and send a request.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = self.authorizer.authorize(builder.build()?);
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        self.http
            .execute(request)
            .await
            .map_err(ClientError::from_send)
    }
}

/// Decode a successful JSON body or turn the status into an error.
pub(crate) async fn expect_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
    } else {
        Err(error_from_response(response, what).await)
    }
}

/// Accept any success status and drop the body.
pub(crate) async fn expect_success(response: Response, what: &str) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response, what).await)
    }
}

async fn error_from_response(response: Response, what: &str) -> ClientError {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();

    let message = if status == StatusCode::NOT_FOUND && error_text.is_empty() {
        format!("{} not found", what)
    } else {
        ApiError::describe(&error_text)
    };

    debug!(status = %status, what = %what, message = %message, "Request rejected");
    ClientError::ServerError {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl CatalogBackend for ApiClient {
    async fn list_songs(&self) -> setlist_core::Result<Vec<Song>> {
        self.songs().list().await.map_err(SetlistError::from)
    }

    async fn get_playlist(&self, id: PlaylistId) -> setlist_core::Result<Playlist> {
        self.playlists().get(id).await.map_err(SetlistError::from)
    }

    async fn replace_playlist(
        &self,
        request: &MembershipUpdateRequest,
    ) -> setlist_core::Result<Playlist> {
        self.playlists()
            .replace(request.id, request)
            .await
            .map_err(SetlistError::from)
    }
}
