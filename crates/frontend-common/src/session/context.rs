//! Global session context and provider

use crate::client::coordinator;
use crate::config::RouteConfig;
use crate::session::events;
use gloo::timers::callback::Timeout;
use jobdeck_core::{schedule, Role, SessionConfig};
use jobdeck_http::types::TokenGrant;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Session state visible to components
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub role: Option<Role>,
}

/// Session state transitions
pub enum SessionAction {
    /// Persist a fresh login grant and mark the session authenticated
    Login { grant: TokenGrant, remember: bool },
    /// Erase the session and notify the server best-effort
    Logout,
    Authenticated(Role),
    Unauthenticated,
    Loading(bool),
}

/// Session context handle
pub type SessionContext = UseReducerHandle<SessionState>;

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true, // Start with loading to check storage
            role: None,
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::Login { grant, remember } => {
                let Ok(coord) = coordinator() else {
                    return Rc::new(Self {
                        is_authenticated: false,
                        is_loading: false,
                        role: None,
                    });
                };
                coord.store_login(&grant.token, remember, grant.kind);
                let role = grant
                    .kind
                    .map(|kind| kind.role())
                    .or_else(|| coord.current_role())
                    .unwrap_or(Role::User);
                Rc::new(Self {
                    is_authenticated: true,
                    is_loading: false,
                    role: Some(role),
                })
            }
            SessionAction::Logout => {
                // Notify the server first (the refresh cookie identifies the
                // session), then erase locally. The session is
                // client-authoritative: a failed notification is ignored.
                wasm_bindgen_futures::spawn_local(async {
                    if let Ok(client) = crate::client::public_client() {
                        if let Err(err) = client.logout().await {
                            tracing::debug!(%err, "server logout failed, ignoring");
                        }
                    }
                });
                if let Ok(coord) = coordinator() {
                    coord.clear_session();
                }
                Rc::new(Self {
                    is_authenticated: false,
                    is_loading: false,
                    role: None,
                })
            }
            SessionAction::Authenticated(role) => Rc::new(Self {
                is_authenticated: true,
                is_loading: false,
                role: Some(role),
            }),
            SessionAction::Unauthenticated => Rc::new(Self {
                is_authenticated: false,
                is_loading: false,
                role: None,
            }),
            SessionAction::Loading(is_loading) => Rc::new(Self {
                is_loading,
                ..(*self).clone()
            }),
        }
    }
}

pub(crate) type TimerHandle = Rc<RefCell<Option<Timeout>>>;

/// Arm the proactive refresh timer against the stored token's lifetime,
/// re-arming recursively after every successful renewal.
pub(crate) fn arm_refresh_timer(session: SessionContext, timer: TimerHandle) {
    let Ok(coord) = coordinator() else {
        return;
    };
    let config = SessionConfig::default();
    let remaining = coord.remaining_secs();
    match remaining.and_then(|secs| schedule::refresh_delay_ms(secs, &config)) {
        None => {
            // Nothing left to renew against; fail closed.
            coord.clear_session();
            timer.borrow_mut().take();
            session.dispatch(SessionAction::Unauthenticated);
        }
        Some(delay_ms) => {
            tracing::debug!(delay_ms, "arming proactive refresh timer");
            let handle = timer.clone();
            let timeout = Timeout::new(delay_ms, move || {
                handle.borrow_mut().take();
                let session = session.clone();
                let handle = handle.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let Ok(coord) = coordinator() else { return };
                    match coord.refresh().await {
                        Ok(_) => arm_refresh_timer(session, handle),
                        // The expired hook has already flipped the state and
                        // redirected; the timer stays disarmed.
                        Err(_) => {}
                    }
                });
            });
            *timer.borrow_mut() = Some(timeout);
        }
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Session provider props
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Session provider component
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(SessionState::default);
    let timer: TimerHandle = use_mut_ref(|| None);

    // Let the coordinator's failure path flip our state
    {
        let session = session.clone();
        let timer = timer.clone();
        use_effect_with((), move |_| {
            events::set_session_expired_callback(Rc::new(move |_role| {
                timer.borrow_mut().take();
                session.dispatch(SessionAction::Unauthenticated);
            }));

            // Cleanup on unmount
            move || {
                events::clear_session_expired_callback();
            }
        });
    }

    // Evaluate the stored session on mount
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            let path = current_path();
            if RouteConfig::is_public(&path) {
                // Login/signup surfaces never run token logic
                session.dispatch(SessionAction::Unauthenticated);
                return;
            }

            let Ok(coord) = coordinator() else {
                session.dispatch(SessionAction::Unauthenticated);
                return;
            };

            if coord.has_live_token() {
                let role = coord.current_role().unwrap_or(Role::User);
                session.dispatch(SessionAction::Authenticated(role));
            } else if RouteConfig::requires_auth(&path) {
                // One reactive attempt before giving up
                wasm_bindgen_futures::spawn_local(async move {
                    match coord.refresh().await {
                        Ok(_) => {
                            let role = coord.current_role().unwrap_or(Role::User);
                            session.dispatch(SessionAction::Authenticated(role));
                        }
                        Err(_) => session.dispatch(SessionAction::Unauthenticated),
                    }
                });
            } else {
                session.dispatch(SessionAction::Unauthenticated);
            }
        });
    }

    // Keep the proactive timer in step with the authenticated state
    {
        let session = session.clone();
        let timer = timer.clone();
        use_effect_with(session.is_authenticated, move |authenticated| {
            if *authenticated && RouteConfig::requires_auth(&current_path()) {
                arm_refresh_timer(session, timer);
            } else {
                timer.borrow_mut().take();
            }
        });
    }

    // Reflect logins/logouts from other tabs
    {
        let session = session.clone();
        let timer = timer.clone();
        use_effect_with((), move |_| {
            let listener = super::listener::storage_listener(session, timer);
            move || drop(listener)
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}
