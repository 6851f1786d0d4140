//! Session configuration

use chrono::Duration;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the game-collection service.
    pub base_url: String,
    /// Safety margin in seconds subtracted from a token's true expiry.
    pub expiry_skew_secs: i64,
}

impl SessionConfig {
    /// Default expiry skew in seconds.
    pub const DEFAULT_EXPIRY_SKEW_SECS: i64 = 30;

    /// Configuration with the default skew.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            expiry_skew_secs: Self::DEFAULT_EXPIRY_SKEW_SECS,
        }
    }

    /// The skew as a duration.
    pub fn expiry_skew(&self) -> Duration {
        Duration::seconds(self.expiry_skew_secs)
    }
}
