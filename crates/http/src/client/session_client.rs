//! Session-aware API client: proactive token attach, one reactive replay.

use reqwest::{header, Client, Method, Request, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::auth::is_refresh_path;
use super::{build_http_client, ClientError};
use crate::session::SessionCoordinator;
use crate::types::{JobsResponse, Profile};

/// Client for authenticated endpoints.
///
/// Every request first asks the coordinator for a live token (renewing
/// early when expiry is close) and carries it as a bearer credential. A
/// 401 answer triggers exactly one reactive renewal and one replay of the
/// original request; a second 401 is surfaced to the caller. Requests to a
/// renewal endpoint are never replayed.
#[derive(Clone)]
pub struct SessionClient {
    client: Client,
    base_url: String,
    session: SessionCoordinator,
}

impl SessionClient {
    /// Create a new session-aware client
    pub fn new(
        base_url: impl Into<String>,
        session: SessionCoordinator,
    ) -> Result<Self, ClientError> {
        Self::new_with_timeout(base_url, session, None)
    }

    pub(crate) fn new_with_timeout(
        base_url: impl Into<String>,
        session: SessionCoordinator,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The coordinator backing this client
    pub fn coordinator(&self) -> &SessionCoordinator {
        &self.session
    }

    /// Create a request builder; `execute` attaches the credential.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request with the session credential attached.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let mut request = request.build()?;
        let renewal_call = is_refresh_path(request.url().path());
        // One-shot replay handle; consuming it is what "already retried
        // once" means here.
        let replay = request.try_clone();

        if let Some(token) = self.session.valid_token().await {
            set_bearer(&mut request, &token)?;
        }

        let response = self.client.execute(request).await?;
        if response.status() == StatusCode::UNAUTHORIZED && !renewal_call {
            if let Some(mut replay) = replay {
                let token = self
                    .session
                    .refresh()
                    .await
                    .map_err(|err| ClientError::AuthenticationFailed(err.to_string()))?;
                set_bearer(&mut replay, &token)?;
                tracing::debug!(path = %replay.url().path(), "replaying request after renewal");
                let response = self.client.execute(replay).await?;
                return parse(response).await;
            }
        }
        parse(response).await
    }

    /// List job postings visible to the signed-in account.
    pub async fn list_jobs(&self) -> Result<JobsResponse, ClientError> {
        let request = self.request(Method::GET, "/api/jobs");
        self.execute(request).await
    }

    /// Fetch the signed-in account's profile.
    pub async fn profile(&self) -> Result<Profile, ClientError> {
        let request = self.request(Method::GET, "/api/profile");
        self.execute(request).await
    }
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

fn set_bearer(request: &mut Request, token: &str) -> Result<(), ClientError> {
    let value = header::HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ClientError::Configuration("token is not a valid header value".into()))?;
    request.headers_mut().insert(header::AUTHORIZATION, value);
    Ok(())
}
