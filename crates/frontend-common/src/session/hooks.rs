//! Session hooks

use super::{SessionContext, SessionState};
use jobdeck_core::Role;
use yew::prelude::*;

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

/// Hook to get the current session state
#[hook]
pub fn use_session_state() -> SessionState {
    (*use_session()).clone()
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    use_session().is_authenticated
}

/// Hook to get the signed-in role
#[hook]
pub fn use_session_role() -> Option<Role> {
    use_session().role
}
