//! Job board API service

use crate::client::session_client;
use jobdeck_http::types::{JobsResponse, Profile};

/// Job board API service
#[derive(Clone, Default)]
pub struct JobsApiService;

impl JobsApiService {
    /// Create a new jobs API service
    pub fn new() -> Self {
        Self
    }

    /// List job postings for the signed-in account.
    pub async fn list_jobs(&self) -> Result<JobsResponse, String> {
        let client = session_client().map_err(|e| format!("Failed to get client: {e}"))?;
        client.list_jobs().await.map_err(|e| e.to_string())
    }

    /// Fetch the signed-in account's profile.
    pub async fn profile(&self) -> Result<Profile, String> {
        let client = session_client().map_err(|e| format!("Failed to get client: {e}"))?;
        client.profile().await.map_err(|e| e.to_string())
    }
}
