//! Common error handling for the session layer

/// Standard result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Session error types that can be shared across crates
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum SessionError {
    #[error("no token in storage")]
    MissingToken,

    #[error("cannot determine an account role to pick a renewal endpoint")]
    UndeterminedRole,

    #[error("token renewal failed: {message}")]
    Renewal { message: String },

    #[error("renewal response carried no usable token: {message}")]
    MalformedGrant { message: String },
}

impl SessionError {
    /// Create a renewal error
    pub fn renewal(message: impl Into<String>) -> Self {
        Self::Renewal {
            message: message.into(),
        }
    }

    /// Create a malformed-grant error
    pub fn malformed_grant(message: impl Into<String>) -> Self {
        Self::MalformedGrant {
            message: message.into(),
        }
    }
}
