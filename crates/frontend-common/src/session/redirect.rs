//! Login redirects for unrecoverable auth failures

use jobdeck_core::Role;

/// Login surface for a role; the plain login page when the role is unknown.
pub fn login_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Company) => "/company/login",
        Some(Role::Admin) => "/admin/login",
        _ => "/login",
    }
}

/// Hard-redirect the browser to the role's login page.
pub fn to_login(role: Option<Role>) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(login_path(role));
    }
}
