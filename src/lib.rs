//! Client for the Money Manager REST API.
//!
//! [`ApiClient`] sends every request under a base API root with session
//! cookies forwarded. When the backend answers with an auth-failure status
//! the client runs one session refresh shared by all concurrent callers,
//! retries once on success, and otherwise reports [`Error::SessionExpired`]
//! after clearing the cached identity and notifying the host.

mod client;
pub mod config;
pub mod errors;
pub mod request;
pub mod response;
pub mod services;
pub mod session;
pub mod telemetry;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::Config;
pub use errors::Error;
pub use request::ApiRequest;
