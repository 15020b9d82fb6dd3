//! Jobdeck HTTP layer: typed REST clients and the session token coordinator.
//!
//! Everything here runs both in the browser (wasm32, driven by the page
//! event loop) and natively (where the integration tests live).

pub mod types;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod session;

#[cfg(feature = "client")]
pub use client::{ClientError, PublicJobdeckClient, SessionClient, TypedClientBuilder};
#[cfg(feature = "client")]
pub use session::{SessionCoordinator, SessionCoordinatorBuilder};
