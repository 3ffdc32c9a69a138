//! HTTP client with token attachment and retry-once on 401

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use pawfolio_auth::{AuthError, SessionManager};

use crate::error::ApiError;
use crate::Result;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Typed client for the pet-care backend
///
/// Cheap to clone; all clones share the session manager, so refreshes
/// triggered through any clone are coalesced.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionManager,
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>, session: SessionManager) -> Result<Self> {
        Self::with_timeout(base_url, session, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Like [`ApiClient::new`] with an explicit request timeout
    pub fn with_timeout(
        base_url: impl AsRef<str>,
        session: SessionManager,
        timeout: Duration,
    ) -> Result<Self> {
        let parsed = Url::parse(base_url.as_ref())
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let base_url = base_url.as_ref().trim_end_matches('/').to_string();

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Build a request against the backend; authorization is attached at
    /// send time so a refresh between build and send is still picked up
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request and deserialize the JSON response
    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send_with_retry(request).await?;
        Ok(response.json().await?)
    }

    /// Send a request, discarding the response body
    pub(crate) async fn execute_empty(&self, request: RequestBuilder) -> Result<()> {
        self.send_with_retry(request).await?;
        Ok(())
    }

    /// Attach the token, send, and on a 401 replay exactly once after
    /// asking the session manager for a fresh token
    async fn send_with_retry(&self, request: RequestBuilder) -> Result<Response> {
        let replay = request.try_clone();

        let response = self.session.attach_token(request).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check_status(response).await;
        }

        // Requests with a non-clonable body (multipart) cannot be replayed
        let Some(replay) = replay else {
            tracing::debug!("401 on a non-replayable request");
            return Err(ApiError::Auth(AuthError::Unauthorized));
        };

        let token = self.session.handle_unauthorized().await?;
        let response = replay.bearer_auth(token).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Already retried once; do not start another refresh cycle
            return Err(ApiError::Auth(AuthError::RetryExhausted));
        }
        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ApiError::from_status(status, message))
    }
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session: self.session.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawfolio_auth::{TokenPair, TokenStore};
    use pawfolio_storage::Database;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_url: &str) -> ApiClient {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        let session =
            SessionManager::new(store, format!("{server_url}/api/auth/refresh"), "/login");
        session
            .set_tokens(&TokenPair {
                access_token: "stale".to_string(),
                refresh_token: "refresh-1".to_string(),
                token_type: "Bearer".to_string(),
            })
            .unwrap();
        ApiClient::new(server_url, session).unwrap()
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        let session = SessionManager::new(store, "http://localhost:9/r", "/login");

        assert!(matches!(
            ApiClient::new("not a url", session.clone()),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://example.com", session),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        let session = SessionManager::new(store, "http://localhost:9/r", "/login");
        let client = ApiClient::new("http://localhost:8080/", session).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_replays_once_with_fresh_token_after_401() {
        let server = MockServer::start().await;

        // Stale token is rejected, fresh one accepted
        Mock::given(method("GET"))
            .and(path("/api/pets"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/pets"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accessToken": "fresh"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let pets = client.list_pets().await.unwrap();
        assert!(pets.is_empty());

        // The replacement token was stored for future requests
        assert_eq!(client.session().access_token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_second_401_exhausts_the_retry() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/pets"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accessToken": "fresh"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client.list_pets().await;

        assert!(matches!(
            result,
            Err(ApiError::Auth(AuthError::RetryExhausted))
        ));
    }

    #[tokio::test]
    async fn test_refresh_failure_surfaces_and_expires_session() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/pets"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client.list_pets().await;

        assert!(matches!(
            result,
            Err(ApiError::Auth(AuthError::RefreshFailed(_)))
        ));
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_configured_timeout_aborts_slow_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pets"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let store = TokenStore::new(Database::open_in_memory().unwrap());
        let session =
            SessionManager::new(store, format!("{}/api/auth/refresh", server.uri()), "/login");
        let client =
            ApiClient::with_timeout(&server.uri(), session, Duration::from_millis(50)).unwrap();

        assert!(matches!(
            client.list_pets().await,
            Err(ApiError::Request(_))
        ));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pets/42"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such pet"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let result = client.get_pet(42).await;

        match result {
            Err(ApiError::NotFound(message)) => assert_eq!(message, "no such pet"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
