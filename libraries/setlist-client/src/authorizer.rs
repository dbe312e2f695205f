//! Attaches the session credential to outbound requests.

use crate::session::SessionStore;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;
use std::sync::Arc;
use tracing::{trace, warn};
use url::Url;

/// Request decoration step applied to every call the client sends.
///
/// - requests to the authentication endpoint pass through untouched;
/// - otherwise the current token, if any, goes into `Authorization: Bearer`;
/// - without a token the request is sent as-is and the server decides.
///
/// Method and body play no part in the decision. No retries happen here.
#[derive(Debug, Clone)]
pub struct RequestAuthorizer {
    session: Arc<SessionStore>,
}

impl RequestAuthorizer {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn authorize(&self, mut request: Request) -> Request {
        if self.is_authentication_request(request.url()) {
            trace!(url = %request.url(), "Authentication request, no credential attached");
            return request;
        }

        let Some(token) = self.session.current_token() else {
            trace!(url = %request.url(), "No session token, sending unauthenticated");
            return request;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => {
                warn!(error = %e, "Stored token is not a valid header value, sending unauthenticated");
            }
        }

        request
    }

    /// Same origin and path as the login endpoint; query and fragment are ignored.
    fn is_authentication_request(&self, url: &Url) -> bool {
        let login = self.session.login_url();
        url.origin() == login.origin()
            && url.path().trim_end_matches('/') == login.path().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryTokenStorage, TokenStorage};
    use crate::types::ClientConfig;
    use reqwest::Method;

    fn authorizer(token: Option<&str>) -> RequestAuthorizer {
        let storage = Arc::new(MemoryTokenStorage::new());
        if let Some(token) = token {
            storage.store(token).unwrap();
        }
        let session =
            SessionStore::new(&ClientConfig::new("http://api.test:8080"), storage).unwrap();
        RequestAuthorizer::new(Arc::new(session))
    }

    fn request(method: Method, url: &str) -> Request {
        Request::new(method, Url::parse(url).unwrap())
    }

    fn bearer(request: &Request) -> Option<&str> {
        request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }

    #[test]
    fn attaches_bearer_for_every_method() {
        let authorizer = authorizer(Some("tok-123"));

        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            let decorated =
                authorizer.authorize(request(method, "http://api.test:8080/api/playlists/7"));
            assert_eq!(bearer(&decorated), Some("Bearer tok-123"));
        }
    }

    #[test]
    fn never_decorates_login_request() {
        let authorizer = authorizer(Some("tok-123"));

        let decorated =
            authorizer.authorize(request(Method::POST, "http://api.test:8080/api/auth/login"));
        assert!(bearer(&decorated).is_none());

        let decorated =
            authorizer.authorize(request(Method::POST, "http://api.test:8080/api/auth/login/"));
        assert!(bearer(&decorated).is_none());
    }

    #[test]
    fn login_path_on_another_host_is_decorated() {
        let authorizer = authorizer(Some("tok-123"));

        let decorated =
            authorizer.authorize(request(Method::POST, "http://other.test/api/auth/login"));
        assert_eq!(bearer(&decorated), Some("Bearer tok-123"));
    }

    #[test]
    fn passes_through_without_token() {
        let authorizer = authorizer(None);

        let decorated = authorizer.authorize(request(Method::GET, "http://api.test:8080/api/songs"));
        assert!(bearer(&decorated).is_none());
    }

    #[test]
    fn replaces_existing_authorization_header() {
        let authorizer = authorizer(Some("fresh"));
        let mut stale = request(Method::GET, "http://api.test:8080/api/songs");
        stale
            .headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer stale"));

        let decorated = authorizer.authorize(stale);
        assert_eq!(bearer(&decorated), Some("Bearer fresh"));
    }

    #[test]
    fn unusable_token_is_not_sent() {
        let authorizer = authorizer(Some("bad\ntoken"));

        let decorated = authorizer.authorize(request(Method::GET, "http://api.test:8080/api/songs"));
        assert!(bearer(&decorated).is_none());
    }
}
