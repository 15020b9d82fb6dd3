//! Wire types for the Jobdeck REST API.

use jobdeck_core::TokenKind;
use serde::{Deserialize, Serialize};

/// Credentials for the password login endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A token-bearing response exactly as the backend sends it.
///
/// Different backend routes have historically spelled the token field three
/// different ways. [`TokenResponse::into_grant`] is the only place that
/// knows about all of them; everything downstream sees a [`TokenGrant`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token_camel: Option<String>,
    #[serde(rename = "access_token")]
    pub access_token: Option<String>,
    #[serde(rename = "token")]
    pub token: Option<String>,
    #[serde(rename = "tokenType", alias = "token_type")]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Normalize the response into a single typed grant.
    ///
    /// Field precedence follows what the backend emits most often. `None`
    /// when no spelling carries a non-empty token.
    pub fn into_grant(self) -> Option<TokenGrant> {
        let token = self
            .access_token_camel
            .or(self.access_token)
            .or(self.token)
            .filter(|token| !token.is_empty())?;
        let kind = self.token_type.as_deref().and_then(TokenKind::parse);
        Some(TokenGrant { token, kind })
    }
}

/// Canonical result of a login or renewal call.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGrant {
    pub token: String,
    /// Kind tag when the backend sent one; the stored tag is kept otherwise.
    pub kind: Option<TokenKind>,
}

/// A published job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: u64,
    pub title: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobPosting>,
    #[serde(default)]
    pub total: u64,
}

/// The signed-in account's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(body: &str) -> TokenResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn grant_normalizes_every_token_spelling() {
        for body in [
            r#"{"accessToken": "tok"}"#,
            r#"{"access_token": "tok"}"#,
            r#"{"token": "tok"}"#,
        ] {
            let grant = from_json(body).into_grant().unwrap();
            assert_eq!(grant.token, "tok");
            assert_eq!(grant.kind, None);
        }
    }

    #[test]
    fn grant_prefers_the_camel_case_spelling() {
        let grant = from_json(r#"{"accessToken": "a", "access_token": "b", "token": "c"}"#)
            .into_grant()
            .unwrap();
        assert_eq!(grant.token, "a");
    }

    #[test]
    fn grant_carries_the_kind_tag() {
        let grant = from_json(r#"{"token": "tok", "tokenType": "access_company"}"#)
            .into_grant()
            .unwrap();
        assert_eq!(grant.kind, Some(TokenKind::CompanyAccess));

        let grant = from_json(r#"{"token": "tok", "token_type": "admin_access"}"#)
            .into_grant()
            .unwrap();
        assert_eq!(grant.kind, Some(TokenKind::AdminAccess));
    }

    #[test]
    fn tokenless_or_empty_responses_yield_no_grant() {
        assert!(from_json(r#"{"ok": true}"#).into_grant().is_none());
        assert!(from_json(r#"{"token": ""}"#).into_grant().is_none());
    }

    #[test]
    fn unknown_kind_tags_are_dropped_not_fatal() {
        let grant = from_json(r#"{"token": "tok", "tokenType": "bearer"}"#)
            .into_grant()
            .unwrap();
        assert_eq!(grant.kind, None);
    }
}
