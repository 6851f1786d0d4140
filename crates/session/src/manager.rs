//! Session lifecycle manager
//!
//! Owns the in-memory session state and orchestrates the silent-refresh
//! bootstrap flow. Consumers read the state only through this manager's
//! queries; nothing else mutates it.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use ludex_core::{AccessToken, SessionState, is_expired};
use ludex_http::client::error::ClientError;
use ludex_http::client::{AuthenticatedLudexClient, PublicLudexClient, TypedClientBuilder};
use ludex_http::types::TokenResponse;

use crate::config::SessionConfig;
use crate::guard::{Navigate, ResponseGuard};

/// Owns the session state and the token lifecycle.
///
/// Cheap to clone; clones share the same state. Pass a handle to every
/// collaborator that needs session queries instead of consulting a global.
#[derive(Clone)]
pub struct SessionManager {
    state: Arc<RwLock<SessionState>>,
    config: SessionConfig,
    public: PublicLudexClient,
    guard: ResponseGuard,
}

impl SessionManager {
    /// Create a manager for the configured service.
    pub fn new(config: SessionConfig, navigator: Arc<dyn Navigate>) -> Result<Self, ClientError> {
        let public = TypedClientBuilder::new()
            .base_url(config.base_url.clone())
            .build_public()?;

        Ok(Self {
            state: Arc::new(RwLock::new(SessionState::new())),
            config,
            public,
            guard: ResponseGuard::new(navigator),
        })
    }

    /// Run the silent token renewal. Called exactly once at startup.
    ///
    /// Consumers must not render protected content while [`loading`] is true;
    /// the flag only drops once this future resolves, whatever the outcome.
    /// Refresh failures are absorbed here (the session simply starts
    /// unauthenticated) and are not retried, so a permanently invalid
    /// refresh credential cannot cause a refresh loop.
    ///
    /// [`loading`]: SessionManager::loading
    pub async fn bootstrap(&self) {
        self.set_loading(true);

        match self.public.refresh().await {
            Ok(response) => {
                let response = self.guard.inspect(response);
                if response.is_success() {
                    match response.json::<TokenResponse>() {
                        Ok(payload) => {
                            tracing::info!("session refreshed");
                            self.set_token(Some(payload.access_token));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "refresh payload malformed, starting unauthenticated");
                            self.clear();
                        }
                    }
                } else {
                    tracing::debug!(
                        status = response.status().as_u16(),
                        "refresh rejected, starting unauthenticated"
                    );
                    self.clear();
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "refresh request failed, starting unauthenticated");
                self.clear();
            }
        }

        self.set_loading(false);
    }

    /// Whether the initial refresh is still in flight.
    pub fn loading(&self) -> bool {
        self.read_state().loading
    }

    /// Snapshot of the current token, if any.
    pub fn token(&self) -> Option<AccessToken> {
        self.read_state().token
    }

    /// Replace the token wholesale. `None` is equivalent to [`clear`].
    ///
    /// [`clear`]: SessionManager::clear
    pub fn set_token(&self, raw: Option<String>) {
        let token = raw.map(AccessToken::new);
        let mut state = self
            .state
            .write()
            .expect("failed to acquire session state lock");
        state.token = token;
    }

    /// Drop the current token. Idempotent; does not navigate.
    pub fn clear(&self) {
        self.set_token(None);
    }

    /// Whether the current token is unusable (absent, undecodable, or inside
    /// the expiry skew window). Pure query, no mutation.
    pub fn is_expired(&self) -> bool {
        let state = self.read_state();
        is_expired(state.token.as_ref(), Utc::now(), self.config.expiry_skew())
    }

    /// Authenticated client for the current token, or `None` when the token
    /// is unusable. Every data fetch goes through this gate.
    pub fn authorized_client(&self) -> Option<AuthenticatedLudexClient> {
        let state = self.read_state();
        let token = state.token.as_ref()?;
        if is_expired(Some(token), Utc::now(), self.config.expiry_skew()) {
            return None;
        }
        Some(self.public.authenticate(token.as_str()))
    }

    fn set_loading(&self, loading: bool) {
        let mut state = self
            .state
            .write()
            .expect("failed to acquire session state lock");
        state.loading = loading;
    }

    fn read_state(&self) -> SessionState {
        self.state
            .read()
            .expect("failed to acquire session state lock")
            .clone()
    }
}
