//! Shared helpers for session integration tests

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use ludex_session::Navigate;

/// Build an unsigned-but-well-formed bearer token expiring `expires_in_secs`
/// from now (negative for already expired).
pub fn bearer_token(expires_in_secs: i64) -> String {
    let exp = Utc::now().timestamp() + expires_in_secs;
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{exp}}}"#));
    format!("{header}.{payload}.dGVzdA")
}

/// Navigator for tests that must never trigger a forced logout.
pub struct NullNavigator;

impl Navigate for NullNavigator {
    fn go_to_login(&self) {}
}
