//! Session lifecycle callbacks
//!
//! The coordinator lives below the component tree; when a renewal fails for
//! good it reports through here so the provider can flip its state without
//! either side knowing about the other.

use jobdeck_core::Role;
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    /// Global session-expired callback
    static SESSION_EXPIRED_CALLBACK: RefCell<Option<Rc<dyn Fn(Option<Role>)>>> =
        RefCell::new(None);
}

/// Set the global session-expired callback
pub fn set_session_expired_callback(callback: Rc<dyn Fn(Option<Role>)>) {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

/// Clear the session-expired callback
pub fn clear_session_expired_callback() {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Trigger the session-expired callback
pub fn notify_session_expired(role: Option<Role>) {
    SESSION_EXPIRED_CALLBACK.with(|cb| {
        if let Some(callback) = cb.borrow().as_ref() {
            callback(role);
        }
    });
}
