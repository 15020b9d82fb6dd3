//! Client configuration and initialization
//!
//! The composition root for the browser: one coordinator and one client of
//! each flavor per page, built lazily from `window.location`. Coordinators
//! hold `Rc` state, so the slots are thread-locals rather than `Lazy`
//! statics; on wasm there is only the one thread anyway.

use crate::clock::BrowserClock;
use crate::session::{events, redirect};
use crate::storage;
pub use jobdeck_http::client::ClientError;
use jobdeck_http::client::{PublicJobdeckClient, SessionClient, TypedClientBuilder};
use jobdeck_http::session::SessionCoordinator;
use std::cell::RefCell;
use web_sys::window;

thread_local! {
    static PUBLIC_CLIENT: RefCell<Option<PublicJobdeckClient>> = RefCell::new(None);
    static SESSION_CLIENT: RefCell<Option<SessionClient>> = RefCell::new(None);
}

/// Get the base URL for API calls
fn get_base_url() -> String {
    // Try to get from window location
    if let Some(window) = window() {
        if let Ok(location) = window.location().origin() {
            return location;
        }
    }

    // Default to relative URLs
    String::new()
}

/// Get the public client instance (for unauthenticated endpoints)
pub fn public_client() -> Result<PublicJobdeckClient, ClientError> {
    PUBLIC_CLIENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = TypedClientBuilder::new()
            .base_url(get_base_url())
            .build_public()?;
        *slot = Some(client.clone());
        Ok(client)
    })
}

/// Get the session-aware client instance, building the coordinator on first
/// use.
pub fn session_client() -> Result<SessionClient, ClientError> {
    SESSION_CLIENT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let vault = storage::browser_vault()
            .ok_or_else(|| ClientError::Configuration("browser storage unavailable".into()))?;
        let coordinator = SessionCoordinator::builder()
            .base_url(get_base_url())
            .vault(vault)
            .clock(BrowserClock)
            .on_session_expired(|role| {
                events::notify_session_expired(role);
                redirect::to_login(role);
            })
            .build()?;
        let client = TypedClientBuilder::new()
            .base_url(get_base_url())
            .build_session(coordinator)?;
        *slot = Some(client.clone());
        Ok(client)
    })
}

/// The coordinator backing the session client
pub fn coordinator() -> Result<SessionCoordinator, ClientError> {
    Ok(session_client()?.coordinator().clone())
}
