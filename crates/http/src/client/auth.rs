//! Authentication API client methods

use super::{ClientError, PublicJobdeckClient};
use crate::types::{LoginRequest, TokenResponse};
use jobdeck_core::Role;

pub(crate) fn refresh_path(role: Role) -> &'static str {
    match role {
        Role::User => "/api/auth/refresh",
        Role::Company => "/api/auth/company/refresh",
        Role::Admin => "/api/auth/admin/refresh",
    }
}

fn login_path(role: Role) -> &'static str {
    match role {
        Role::User => "/api/auth/login",
        Role::Company => "/api/auth/company/login",
        Role::Admin => "/api/auth/admin/login",
    }
}

/// Whether `path` is one of the token renewal endpoints.
pub(crate) fn is_refresh_path(path: &str) -> bool {
    [Role::User, Role::Company, Role::Admin]
        .iter()
        .any(|role| refresh_path(*role) == path)
}

impl PublicJobdeckClient {
    /// Sign in with email/password credentials.
    ///
    /// Returns the raw wire shape; callers normalize it with
    /// [`TokenResponse::into_grant`].
    pub async fn login(
        &self,
        role: Role,
        request: LoginRequest,
    ) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, login_path(role))
            .json(&request);
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        self.execute(req).await
    }

    /// Renew the current session.
    ///
    /// The call carries no body; the refresh credential rides on a cookie,
    /// which is why the browser build sends credentials.
    pub async fn refresh(&self, role: Role) -> Result<TokenResponse, ClientError> {
        let req = self.request(reqwest::Method::POST, refresh_path(role));
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        self.execute(req).await
    }

    /// Server-side logout. Callers treat failures as non-fatal; the client
    /// session is authoritative.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let req = self.request(reqwest::Method::DELETE, "/api/auth/logout");
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}
