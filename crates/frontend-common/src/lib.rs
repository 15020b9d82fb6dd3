//! Shared Yew building blocks for the Jobdeck frontends.

pub mod client;
pub mod clock;
pub mod config;
pub mod logging;
pub mod services;
pub mod session;
pub mod storage;

pub use client::{coordinator, public_client, session_client};
pub use clock::BrowserClock;
pub use config::RouteConfig;
pub use session::{
    use_is_authenticated, use_session, use_session_role, RequireSession, SessionAction,
    SessionContext, SessionProvider, SessionState,
};
