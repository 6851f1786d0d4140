//! Wire types shared with the game-collection service

use serde::{Deserialize, Serialize};

/// Exact message the service emits when a token's signature no longer
/// verifies. Kept in one place; nothing else compares this string.
pub const SIGNATURE_INVALID_MSG: &str = "Signature verification failed";

/// Payload returned by the refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Newly minted access token.
    pub access_token: String,
}

/// A game in the user's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Fields for creating a game; the server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Error envelope the service attaches to non-2xx responses.
///
/// The refresh path reports through `msg`; the collection endpoints report
/// through `errors`. Both are optional because the service is not consistent
/// about which it sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiErrorBody {
    /// Decode the authentication failure reported in `msg`, if any.
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        self.msg.as_deref().map(AuthFailure::from_message)
    }

    /// Human-readable summary for display to the user.
    pub fn summary(&self) -> String {
        match (&self.msg, &self.errors) {
            (_, Some(errors)) if !errors.is_empty() => errors.join(", "),
            (Some(msg), _) => msg.clone(),
            _ => "unknown error".to_string(),
        }
    }
}

/// Authentication failure decoded from the error envelope's `msg` field.
///
/// Replaces comparing the raw message string at every call site; the literal
/// server wording is matched exactly once, in [`AuthFailure::from_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// The token's signature no longer verifies. The session can never
    /// recover without a fresh login.
    SignatureInvalid,
    /// Any other authentication message.
    Other(String),
}

impl AuthFailure {
    /// Classify a `msg` value from the service.
    pub fn from_message(msg: &str) -> Self {
        if msg == SIGNATURE_INVALID_MSG {
            Self::SignatureInvalid
        } else {
            Self::Other(msg.to_string())
        }
    }
}
