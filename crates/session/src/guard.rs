//! Forced-logout detection over refresh responses

use std::sync::Arc;

use ludex_http::client::ApiResponse;
use ludex_http::types::AuthFailure;

/// Navigation collaborator invoked on forced logout.
///
/// Contract: unconditionally transitions the user to the unauthenticated
/// entry view. Whether that is a history push or a full reload is the
/// implementer's choice.
pub trait Navigate: Send + Sync {
    fn go_to_login(&self);
}

/// Inspects responses for the one condition that can never recover locally:
/// a token whose signature fails verification on the server.
///
/// Currently wired only to the refresh call path. Extending it to every
/// authenticated request would make any guarded endpoint redirect on
/// signature corruption, a user-visible behavior change.
#[derive(Clone)]
pub struct ResponseGuard {
    navigator: Arc<dyn Navigate>,
}

impl ResponseGuard {
    /// Create a guard that reports through the given navigator.
    pub fn new(navigator: Arc<dyn Navigate>) -> Self {
        Self { navigator }
    }

    /// Pass-through inspection.
    ///
    /// On a 422 whose body decodes to a signature failure, the navigation
    /// collaborator fires; the response is returned unmodified either way so
    /// the caller can still branch on its status. Ordinary 4xx/5xx are not
    /// this guard's business and are surfaced to views elsewhere.
    pub fn inspect(&self, response: ApiResponse) -> ApiResponse {
        if response.status().as_u16() == 422
            && response.error_body().auth_failure() == Some(AuthFailure::SignatureInvalid)
        {
            tracing::warn!("token signature rejected by server, forcing logout");
            self.navigator.go_to_login();
        }
        response
    }
}
