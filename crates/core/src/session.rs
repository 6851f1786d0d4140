//! In-memory session state.

use crate::token::AccessToken;

/// Snapshot of the client session.
///
/// Owned exclusively by the session manager; every other component reads it
/// through the manager's queries. `loading` starts true and drops to false
/// once the initial silent refresh resolves, which is what keeps consumers
/// from rendering protected content before a session exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<AccessToken>,
    pub loading: bool,
}

impl SessionState {
    /// Initial state at application start: no token, consumers blocked.
    pub fn new() -> Self {
        Self {
            token: None,
            loading: true,
        }
    }

    /// Whether a token is currently held (says nothing about expiry).
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
