use tracing::warn;

/// Host hook run when a session cannot be renewed, typically a navigation to
/// the unauthenticated landing route.
pub trait SessionExpiryHandler: Send + Sync {
    fn session_expired(&self, landing_route: &str);
}

impl<F> SessionExpiryHandler for F
where
    F: Fn(&str) + Send + Sync,
{
    fn session_expired(&self, landing_route: &str) {
        self(landing_route)
    }
}

/// Default handler for hosts without a navigation surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogOnExpiry;

impl SessionExpiryHandler for LogOnExpiry {
    fn session_expired(&self, landing_route: &str) {
        warn!(landing_route, "session.expired: no navigation handler installed");
    }
}
