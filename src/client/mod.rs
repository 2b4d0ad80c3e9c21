use std::sync::Arc;

use crate::session::{AuthFailurePolicy, IdentityStore, RefreshLock, SessionExpiryHandler};

mod builder;
mod impls;

pub use builder::ApiClientBuilder;

/// Authenticated client for the Money Manager REST API.
///
/// Clones share the HTTP connection pool, cookie store and refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    refresh_path: String,
    landing_route: String,
    policy: AuthFailurePolicy,
    refresh_lock: Arc<RefreshLock>,
    identity: Arc<dyn IdentityStore>,
    on_expired: Arc<dyn SessionExpiryHandler>,
}
