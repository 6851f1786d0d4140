//! Access tokens and the token clock.
//!
//! The clock decides whether a token is still usable without ever verifying
//! its signature; signature trust is the server's job. The client only needs
//! the `exp` claim, and it reads that claim straight out of the payload
//! segment.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

use crate::error::TokenError;

/// Bearer credential proving session identity to the service.
///
/// Only the raw string is stored. The expiry instant is recomputed from it on
/// every query, so the token and its expiry can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    raw: String,
}

impl AccessToken {
    /// Wrap a raw bearer string.
    ///
    /// The string is accepted as-is; a token that later fails to decode is
    /// simply treated as expired.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw bearer string, suitable for an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Decode the expiry instant from the token's `exp` claim.
    pub fn expires_at(&self) -> Result<DateTime<Utc>, TokenError> {
        decode_expiry(&self.raw)
    }
}

/// The subset of JWT claims the client reads.
#[derive(Debug, Deserialize)]
struct Claims {
    // NumericDate per RFC 7519; may be fractional.
    exp: Option<f64>,
}

/// Decode the expiry instant from a raw JWT without verifying its signature.
pub fn decode_expiry(raw: &str) -> Result<DateTime<Utc>, TokenError> {
    let mut segments = raw.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::malformed(
            "expected three dot-separated segments",
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|err| TokenError::malformed(format!("payload segment: {err}")))?;
    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|err| TokenError::malformed(format!("payload claims: {err}")))?;
    let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;

    Utc.timestamp_opt(exp as i64, 0)
        .single()
        .ok_or_else(|| TokenError::malformed("expiry out of range"))
}

/// Decide whether a token is usable at `now`.
///
/// Returns true when the token is absent, undecodable, or expires within the
/// skew window. The skew treats a token as expired slightly before its true
/// expiry so a request is never sent with a token that lapses mid-flight.
pub fn is_expired(token: Option<&AccessToken>, now: DateTime<Utc>, skew: Duration) -> bool {
    match token {
        None => true,
        Some(token) => match token.expires_at() {
            Ok(expiry) => expiry <= now + skew,
            Err(_) => true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    fn token_expiring_at(exp: i64) -> AccessToken {
        AccessToken::new(encode_token(&format!(r#"{{"sub":"42","exp":{exp}}}"#)))
    }

    #[test]
    fn decodes_expiry_claim() {
        let token = token_expiring_at(1_700_000_000);
        let expiry = token.expires_at().unwrap();
        assert_eq!(expiry.timestamp(), 1_700_000_000);
    }

    #[test]
    fn missing_segments_are_malformed() {
        let err = decode_expiry("not-a-jwt").unwrap_err();
        assert!(matches!(err, TokenError::Malformed { .. }));

        let err = decode_expiry("one.two").unwrap_err();
        assert!(matches!(err, TokenError::Malformed { .. }));

        let err = decode_expiry("a.b.c.d").unwrap_err();
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn bad_base64_is_malformed() {
        let err = decode_expiry("header.%%%.sig").unwrap_err();
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn bad_json_is_malformed() {
        let payload = URL_SAFE_NO_PAD.encode(b"not json");
        let err = decode_expiry(&format!("h.{payload}.s")).unwrap_err();
        assert!(matches!(err, TokenError::Malformed { .. }));
    }

    #[test]
    fn missing_exp_claim_is_reported() {
        let token = encode_token(r#"{"sub":"42"}"#);
        assert_eq!(decode_expiry(&token).unwrap_err(), TokenError::MissingExpiry);
    }

    #[test]
    fn absent_token_is_always_expired() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(is_expired(None, now, Duration::seconds(30)));
        assert!(is_expired(None, now, Duration::zero()));
    }

    #[test]
    fn malformed_token_is_always_expired() {
        let token = AccessToken::new("garbage");
        let now = Utc.timestamp_opt(0, 0).unwrap();
        assert!(is_expired(Some(&token), now, Duration::seconds(30)));
    }

    #[test]
    fn expiry_comparison_includes_skew() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let skew = Duration::seconds(30);

        // Expires exactly at the edge of the skew window: already unusable.
        let token = token_expiring_at(1_700_000_030);
        assert!(is_expired(Some(&token), now, skew));

        // One second past the window: still usable.
        let token = token_expiring_at(1_700_000_031);
        assert!(!is_expired(Some(&token), now, skew));

        // Long expired.
        let token = token_expiring_at(1_600_000_000);
        assert!(is_expired(Some(&token), now, skew));
    }

    #[test]
    fn fractional_exp_is_truncated() {
        let token = AccessToken::new(encode_token(r#"{"exp":1700000000.75}"#));
        assert_eq!(token.expires_at().unwrap().timestamp(), 1_700_000_000);
    }
}
