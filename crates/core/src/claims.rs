//! Advisory claims decoding for bearer tokens.
//!
//! The payload segment of a token is decoded without verifying the
//! signature; the server remains the authority on validity. Decoded claims
//! only drive client-side timing and routing decisions, so every failure
//! mode collapses to "no claims", which callers treat as an expired session.

use std::collections::VecDeque;
use std::sync::Mutex;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::token::Role;

/// Claims embedded in an access token payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issued at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Account-type discriminator used by most backend routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Alternative discriminator used by older routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Anything else the backend includes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decodes token payloads, memoizing successful decodes.
///
/// The same token is decoded on every outgoing request, so results are
/// cached keyed by the raw token string, oldest entry evicted at capacity.
/// Tokens are immutable strings, so a cached entry can never go stale.
pub struct ClaimsDecoder {
    capacity: usize,
    cache: Mutex<VecDeque<(String, Claims)>>,
}

impl ClaimsDecoder {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            cache: Mutex::new(VecDeque::new()),
        }
    }

    /// Decode the payload segment of `token`.
    ///
    /// Returns `None` for anything that is not a three-segment token with a
    /// base64url JSON-object payload. Never panics on malformed input.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        {
            let cache = self.cache.lock().expect("claims cache lock poisoned");
            if let Some((_, claims)) = cache.iter().find(|(key, _)| key == token) {
                return Some(claims.clone());
            }
        }

        let claims = decode_payload(token)?;

        let mut cache = self.cache.lock().expect("claims cache lock poisoned");
        cache.push_back((token.to_owned(), claims.clone()));
        while cache.len() > self.capacity {
            cache.pop_front();
        }
        Some(claims)
    }

    /// Expiry instant in epoch seconds, if the token decodes and carries one.
    pub fn expires_at(&self, token: &str) -> Option<i64> {
        self.decode(token)?.exp
    }

    /// Seconds of life left at `now`, floored at zero. `None` when the token
    /// carries no decodable expiry.
    pub fn remaining_secs(&self, token: &str, now: i64) -> Option<i64> {
        Some((self.expires_at(token)? - now).max(0))
    }

    /// A token without a decodable expiry counts as already expired.
    pub fn is_expired(&self, token: &str, now: i64) -> bool {
        match self.expires_at(token) {
            Some(exp) => now >= exp,
            None => true,
        }
    }

    /// Whether the token expires within `buffer_secs` of `now` (or carries
    /// no decodable expiry at all).
    pub fn is_expiring_soon(&self, token: &str, now: i64, buffer_secs: i64) -> bool {
        match self.expires_at(token) {
            Some(exp) => exp - now <= buffer_secs,
            None => true,
        }
    }

    /// Account role carried by the token.
    ///
    /// Checks the `user_type` claim, then `role`, both case-insensitively;
    /// falls back to a substring heuristic on `sub`; defaults to
    /// [`Role::User`] for any token that decodes. `None` only when the
    /// token itself does not decode.
    pub fn role_of(&self, token: &str) -> Option<Role> {
        let claims = self.decode(token)?;
        Some(role_from_claims(&claims))
    }

    #[cfg(test)]
    fn is_cached(&self, token: &str) -> bool {
        self.cache
            .lock()
            .expect("claims cache lock poisoned")
            .iter()
            .any(|(key, _)| key == token)
    }
}

impl Default for ClaimsDecoder {
    fn default() -> Self {
        Self::new(SessionConfig::default().decode_cache_capacity)
    }
}

fn decode_payload(token: &str) -> Option<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments[1].is_empty() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(segments[1]).ok()?;
    match serde_json::from_slice::<Claims>(&bytes) {
        Ok(claims) => Some(claims),
        Err(err) => {
            tracing::debug!(%err, "token payload is not a claims object");
            None
        }
    }
}

fn role_from_claims(claims: &Claims) -> Role {
    for discriminator in [&claims.user_type, &claims.role].into_iter().flatten() {
        if let Some(role) = match_role(discriminator) {
            return role;
        }
    }
    if let Some(sub) = &claims.sub {
        if sub.to_ascii_lowercase().contains("company") {
            return Role::Company;
        }
    }
    Role::User
}

fn match_role(value: &str) -> Option<Role> {
    if value.eq_ignore_ascii_case("company") {
        Some(Role::Company)
    } else if value.eq_ignore_ascii_case("user") {
        Some(Role::User)
    } else {
        None
    }
}

/// Build an unsigned three-segment token around `claims`, for tests.
///
/// The signature segment is junk on purpose: the decoder never looks at it.
#[cfg(any(test, feature = "tests"))]
pub fn encode_unsigned_token(claims: &Claims) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).expect("claims serialize to JSON"));
    format!("{header}.{payload}.unsigned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    fn token(claims: Claims) -> String {
        encode_unsigned_token(&claims)
    }

    fn token_with_exp(exp: i64) -> String {
        token(Claims {
            sub: Some("42".into()),
            exp: Some(exp),
            ..Default::default()
        })
    }

    #[test]
    fn decode_round_trips_payload() {
        let claims = Claims {
            sub: Some("user_7".into()),
            iat: Some(NOW - 60),
            exp: Some(NOW + 3600),
            user_type: Some("user".into()),
            ..Default::default()
        };
        let decoder = ClaimsDecoder::default();
        assert_eq!(decoder.decode(&token(claims.clone())), Some(claims));
    }

    #[test]
    fn decode_keeps_unknown_claims() {
        let mut claims = Claims {
            exp: Some(NOW + 10),
            ..Default::default()
        };
        claims
            .extra
            .insert("scope".into(), json!("jobs:read"));
        let decoder = ClaimsDecoder::default();
        let decoded = decoder.decode(&token(claims)).unwrap();
        assert_eq!(decoded.extra.get("scope"), Some(&json!("jobs:read")));
    }

    #[test]
    fn decode_fails_closed_on_malformed_input() {
        let decoder = ClaimsDecoder::default();
        // wrong segment count
        assert_eq!(decoder.decode("onlyonepart"), None);
        assert_eq!(decoder.decode("a.b"), None);
        assert_eq!(decoder.decode("a.b.c.d"), None);
        // empty payload
        assert_eq!(decoder.decode("a..c"), None);
        // invalid base64url
        assert_eq!(decoder.decode("a.!!!.c"), None);
        // valid base64url, invalid JSON
        let junk = URL_SAFE_NO_PAD.encode(b"not json");
        assert_eq!(decoder.decode(&format!("a.{junk}.c")), None);
        // valid JSON, not an object
        let scalar = URL_SAFE_NO_PAD.encode(b"5");
        assert_eq!(decoder.decode(&format!("a.{scalar}.c")), None);
    }

    #[test]
    fn undecodable_expiry_counts_as_expired() {
        let decoder = ClaimsDecoder::default();
        assert!(decoder.is_expired("garbage", NOW));
        // decodable token, no exp claim
        let no_exp = token(Claims {
            sub: Some("42".into()),
            ..Default::default()
        });
        assert!(decoder.is_expired(&no_exp, NOW));
        assert!(decoder.is_expiring_soon(&no_exp, NOW, 300));
        assert_eq!(decoder.remaining_secs(&no_exp, NOW), None);
    }

    #[test]
    fn remaining_secs_floors_at_zero() {
        let decoder = ClaimsDecoder::default();
        assert_eq!(
            decoder.remaining_secs(&token_with_exp(NOW + 120), NOW),
            Some(120)
        );
        assert_eq!(
            decoder.remaining_secs(&token_with_exp(NOW - 120), NOW),
            Some(0)
        );
    }

    #[test]
    fn expiry_boundaries() {
        let decoder = ClaimsDecoder::default();
        assert!(!decoder.is_expired(&token_with_exp(NOW + 1), NOW));
        assert!(decoder.is_expired(&token_with_exp(NOW), NOW));
        assert!(decoder.is_expired(&token_with_exp(NOW - 1), NOW));
    }

    #[test]
    fn expiring_soon_uses_the_buffer() {
        let decoder = ClaimsDecoder::default();
        assert!(!decoder.is_expiring_soon(&token_with_exp(NOW + 3600), NOW, 300));
        assert!(decoder.is_expiring_soon(&token_with_exp(NOW + 200), NOW, 300));
        // boundary: exactly the buffer away counts as soon
        assert!(decoder.is_expiring_soon(&token_with_exp(NOW + 300), NOW, 300));
    }

    #[test]
    fn role_detection_order() {
        let decoder = ClaimsDecoder::default();
        let company_type = token(Claims {
            user_type: Some("COMPANY".into()),
            ..Default::default()
        });
        assert_eq!(decoder.role_of(&company_type), Some(Role::Company));

        let user_role = token(Claims {
            role: Some("USER".into()),
            ..Default::default()
        });
        assert_eq!(decoder.role_of(&user_role), Some(Role::User));

        let company_sub = token(Claims {
            sub: Some("company_42".into()),
            ..Default::default()
        });
        assert_eq!(decoder.role_of(&company_sub), Some(Role::Company));

        let bare_sub = token(Claims {
            sub: Some("42".into()),
            ..Default::default()
        });
        assert_eq!(decoder.role_of(&bare_sub), Some(Role::User));

        assert_eq!(decoder.role_of("garbage"), None);
    }

    #[test]
    fn user_type_wins_over_role_claim() {
        let decoder = ClaimsDecoder::default();
        let conflicting = token(Claims {
            user_type: Some("company".into()),
            role: Some("user".into()),
            ..Default::default()
        });
        assert_eq!(decoder.role_of(&conflicting), Some(Role::Company));
    }

    #[test]
    fn cache_evicts_oldest_at_capacity() {
        let decoder = ClaimsDecoder::new(2);
        let first = token_with_exp(NOW + 1);
        let second = token_with_exp(NOW + 2);
        let third = token_with_exp(NOW + 3);

        decoder.decode(&first);
        decoder.decode(&second);
        assert!(decoder.is_cached(&first));

        decoder.decode(&third);
        assert!(!decoder.is_cached(&first));
        assert!(decoder.is_cached(&second));
        assert!(decoder.is_cached(&third));
    }

    #[test]
    fn cache_does_not_store_failures() {
        let decoder = ClaimsDecoder::new(2);
        assert_eq!(decoder.decode("a.b"), None);
        assert!(!decoder.is_cached("a.b"));
    }
}
