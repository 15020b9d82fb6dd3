//! API services

pub mod auth;
pub mod jobs;

pub use auth::AuthApiService;
pub use jobs::JobsApiService;
