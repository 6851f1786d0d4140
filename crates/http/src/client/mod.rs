//! Type-safe API clients for the game-collection service
//!
//! Two client types enforce the authentication requirement at compile time:
//! [`PublicLudexClient`] reaches only the refresh endpoint (the refresh
//! credential rides along ambiently in the cookie jar), while
//! [`AuthenticatedLudexClient`] attaches the bearer token to every request.

pub mod error;

use bytes::Bytes;
use error::ClientError;
use reqwest::{Client, ClientBuilder, StatusCode, header};
use std::time::Duration;

use crate::types::{ApiErrorBody, Game, GameDraft};

const USER_AGENT: &str = "ludex-client/0.1.0";

/// A fully buffered response: status plus body bytes.
///
/// Buffering lets one caller inspect the error envelope while another decodes
/// the payload, without either consuming the response for the other.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Bytes,
}

impl ApiResponse {
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;
        Ok(Self { status, body })
    }

    /// Response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the service's error envelope, tolerating any body shape.
    pub fn error_body(&self) -> ApiErrorBody {
        serde_json::from_slice(&self.body).unwrap_or_default()
    }

    /// Convert a failed response into the matching client error.
    pub fn into_error(self) -> ClientError {
        ClientError::from_status(self.status, self.error_body().summary())
    }

    fn into_result<T: serde::de::DeserializeOwned>(self) -> Result<T, ClientError> {
        if self.is_success() {
            self.json()
        } else {
            Err(self.into_error())
        }
    }
}

/// Client for public endpoints that don't require a bearer token
#[derive(Clone)]
pub struct PublicLudexClient {
    client: Client,
    base_url: String,
}

/// Client for endpoints that require a valid access token
#[derive(Clone)]
pub struct AuthenticatedLudexClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PublicLudexClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new_with_timeout(base_url, None)
    }

    fn new_with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = build_http_client(timeout)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Send a request and buffer the response without judging its status.
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse, ClientError> {
        let response = request.send().await?;
        ApiResponse::read(response).await
    }

    /// Silently renew the access token.
    ///
    /// The request carries no body; the refresh credential is the HTTP-only
    /// cookie already held in the client's cookie jar. The raw response is
    /// returned so the caller can run the forced-logout inspection over it
    /// before deciding what the outcome means.
    pub async fn refresh(&self) -> Result<ApiResponse, ClientError> {
        let request = self.request(reqwest::Method::POST, "/refresh");
        self.send(request).await
    }

    /// Attach an access token to get an authenticated client
    pub fn authenticate(&self, token: impl Into<String>) -> AuthenticatedLudexClient {
        AuthenticatedLudexClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: token.into(),
        }
    }
}

impl AuthenticatedLudexClient {
    /// Create a new authenticated client
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(PublicLudexClient::new(base_url)?.authenticate(token))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder with the bearer token attached
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    /// Execute a request and decode the success payload
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        ApiResponse::read(response).await?.into_result()
    }

    /// Fetch the full game collection
    pub async fn list_games(&self) -> Result<Vec<Game>, ClientError> {
        let request = self.request(reqwest::Method::GET, "/games");
        self.execute(request).await
    }

    /// Create a game; the server assigns the id
    pub async fn create_game(&self, draft: &GameDraft) -> Result<Game, ClientError> {
        let request = self.request(reqwest::Method::POST, "/games").json(draft);
        self.execute(request).await
    }

    /// Delete a game by id
    pub async fn delete_game(&self, id: i64) -> Result<(), ClientError> {
        let request = self.request(reqwest::Method::DELETE, &format!("/games/{id}"));
        let response = request.send().await?;
        let response = ApiResponse::read(response).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(response.into_error())
        }
    }
}

fn build_http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    #[cfg(target_arch = "wasm32")]
    {
        // Timeouts and the cookie jar are not supported on WASM; the browser
        // owns both.
        let _ = timeout;
        Ok(ClientBuilder::new().user_agent(USER_AGENT).build()?)
    }
}

/// Type-safe builder that creates the appropriate client type
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
        }
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicLudexClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        PublicLudexClient::new_with_timeout(base_url, self.timeout)
    }

    /// Build an authenticated client
    pub fn build_authenticated(
        self,
        token: impl Into<String>,
    ) -> Result<AuthenticatedLudexClient, ClientError> {
        Ok(self.build_public()?.authenticate(token))
    }
}

impl Default for TypedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
