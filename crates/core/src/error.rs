//! Core error types shared across crates

use thiserror::Error;

/// Errors produced while decoding an access token.
///
/// Every variant is treated as "already expired" by the token clock; a token
/// the client cannot read is never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is not structurally a JWT the client can read.
    #[error("malformed access token: {reason}")]
    Malformed { reason: String },

    /// The payload decoded but carries no expiry claim.
    #[error("access token has no expiry claim")]
    MissingExpiry,
}

impl TokenError {
    /// Create a malformed-token error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}
