//! Cross-tab session synchronization

use crate::client::coordinator;
use crate::session::context::{arm_refresh_timer, TimerHandle};
use crate::session::{SessionAction, SessionContext};
use gloo::events::EventListener;
use jobdeck_core::vault::TOKEN_KEY;
use jobdeck_core::Role;
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;

/// Reflect another tab's login or logout in this one.
///
/// The browser only fires `storage` events for changes made by *other*
/// tabs, and only for the durable tier, which is exactly the cross-tab
/// case. Changes to keys other than the token key are ignored.
pub fn storage_listener(session: SessionContext, timer: TimerHandle) -> Option<EventListener> {
    let window = web_sys::window()?;
    Some(EventListener::new(&window, "storage", move |event| {
        let Some(event) = event.dyn_ref::<StorageEvent>() else {
            return;
        };
        if event.key().as_deref() != Some(TOKEN_KEY) {
            return;
        }
        let Ok(coord) = coordinator() else {
            return;
        };
        if coord.has_live_token() {
            let role = coord.current_role().unwrap_or(Role::User);
            session.dispatch(SessionAction::Authenticated(role));
            arm_refresh_timer(session.clone(), timer.clone());
        } else {
            timer.borrow_mut().take();
            session.dispatch(SessionAction::Unauthenticated);
        }
    }))
}
