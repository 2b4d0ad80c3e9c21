use std::sync::Arc;

use crate::{
    ApiClient,
    config::Config,
    errors::Error,
    session::{
        AuthFailurePolicy, FileIdentityStore, IdentityStore, LogOnExpiry, MemoryIdentityStore,
        RefreshLock, SessionExpiryHandler,
    },
};

pub struct ApiClientBuilder {
    config: Config,
    http: Option<reqwest::Client>,
    refresh_lock: Option<Arc<RefreshLock>>,
    identity: Option<Arc<dyn IdentityStore>>,
    on_expired: Option<Arc<dyn SessionExpiryHandler>>,
}

impl ApiClientBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            refresh_lock: None,
            identity: None,
            on_expired: None,
        }
    }

    /// Supply a preconfigured transport. It must have a cookie store enabled
    /// for session cookies to be forwarded.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Share a refresh lock with other clients talking to the same backend.
    pub fn refresh_lock(mut self, lock: Arc<RefreshLock>) -> Self {
        self.refresh_lock = Some(lock);
        self
    }

    pub fn identity_store(mut self, store: Arc<dyn IdentityStore>) -> Self {
        self.identity = Some(store);
        self
    }

    pub fn on_session_expired(mut self, handler: impl SessionExpiryHandler + 'static) -> Self {
        self.on_expired = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> Result<ApiClient, Error> {
        let ApiClientBuilder {
            config,
            http,
            refresh_lock,
            identity,
            on_expired,
        } = self;
        config.validate()?;
        let policy = AuthFailurePolicy::new(&config.auth_failure_statuses)?;

        let http = match http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder().cookie_store(true);
                if let Some(timeout) = config.timeout() {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        let identity: Arc<dyn IdentityStore> = match (identity, &config.identity_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(FileIdentityStore::new(path)),
            (None, None) => Arc::new(MemoryIdentityStore::new()),
        };
        let on_expired: Arc<dyn SessionExpiryHandler> = match on_expired {
            Some(handler) => handler,
            None => Arc::new(LogOnExpiry),
        };

        Ok(ApiClient {
            http,
            base_url: config.base().to_string(),
            refresh_path: config.refresh_path.clone(),
            landing_route: config.landing_route.clone(),
            policy,
            refresh_lock: refresh_lock.unwrap_or_default(),
            identity,
            on_expired,
        })
    }
}
