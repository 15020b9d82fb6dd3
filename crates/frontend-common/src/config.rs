//! Frontend route configuration

/// Route groups that decide how much token work the session provider does.
pub struct RouteConfig;

impl RouteConfig {
    /// Routes for signed-out visitors only; mounting here skips all token
    /// logic.
    pub const PUBLIC_ROUTES: &'static [&'static str] = &[
        "/login",
        "/signup",
        "/company/login",
        "/company/signup",
        "/admin/login",
    ];

    /// Route prefixes that require a signed-in session.
    pub const AUTH_PREFIXES: &'static [&'static str] =
        &["/mypage", "/company/dashboard", "/admin"];

    pub fn is_public(path: &str) -> bool {
        Self::PUBLIC_ROUTES.contains(&path)
    }

    pub fn requires_auth(path: &str) -> bool {
        Self::AUTH_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }
}
