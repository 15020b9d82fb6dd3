//! Authentication API service

use crate::client::public_client;
use crate::session::{SessionAction, SessionContext};
use jobdeck_core::Role;
use jobdeck_http::types::LoginRequest;

/// Authentication API service
#[derive(Clone, Default)]
pub struct AuthApiService;

impl AuthApiService {
    /// Create a new auth API service
    pub fn new() -> Self {
        Self
    }

    /// Sign in and hand the grant to the session facade.
    pub async fn login(
        &self,
        session: &SessionContext,
        role: Role,
        email: String,
        password: String,
        remember: bool,
    ) -> Result<(), String> {
        let client = public_client().map_err(|e| format!("Failed to get client: {e}"))?;

        let response = client
            .login(role, LoginRequest { email, password })
            .await
            .map_err(|e| e.to_string())?;
        let grant = response
            .into_grant()
            .ok_or_else(|| "login response carried no token".to_string())?;

        session.dispatch(SessionAction::Login { grant, remember });
        Ok(())
    }

    /// Client-authoritative logout; the server is notified best-effort.
    pub fn logout(&self, session: &SessionContext) {
        session.dispatch(SessionAction::Logout);
    }
}
