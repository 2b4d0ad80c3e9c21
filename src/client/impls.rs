use std::sync::Arc;
use std::time::SystemTime;

use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    ApiClient,
    client::ApiClientBuilder,
    config::Config,
    errors::Error,
    request::ApiRequest,
    response::{error_from_body, normalize_body},
    session::{AuthFailurePolicy, IdentityStore, RefreshLock, RefreshOutcome},
    telemetry::refresh::RefreshTelemetry,
};

impl ApiClient {
    pub fn builder(config: Config) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Client with a cookie-enabled transport, in-memory (or file, when
    /// `identity_path` is set) identity cache, and a logging expiry handler.
    pub fn new(config: Config) -> Result<Self, Error> {
        ApiClientBuilder::new(config).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> &AuthFailurePolicy {
        &self.policy
    }

    pub fn refresh_lock(&self) -> &Arc<RefreshLock> {
        &self.refresh_lock
    }

    pub fn identity(&self) -> &Arc<dyn IdentityStore> {
        &self.identity
    }

    /// Send a request and normalize its response.
    ///
    /// An auth-failure status triggers one shared session refresh; when it
    /// succeeds the request is re-issued once with the same method, headers
    /// and body. Transport failures are returned as-is and never retried.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, Error> {
        let response = self.send_with_refresh(&request).await?;
        self.handle_response(response).await
    }

    /// Like [`ApiClient::send`] for endpoints that answer with a binary body.
    ///
    /// Success bodies are returned untouched; error bodies go through the same
    /// message extraction as JSON endpoints.
    pub async fn send_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, Error> {
        let response = self.send_with_refresh(&request).await?;
        let status = response.status();
        if self.policy.is_auth_failure(status) {
            return Err(self.expire_session(status));
        }
        if !status.is_success() {
            let text = response.text().await?;
            let err = error_from_body(status, &text);
            warn!(status = status.as_u16(), error = %err, "response.error");
            return Err(err);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Like [`ApiClient::send`], then decodes the normalized value into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, Error> {
        let value = self.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Normalize a response that is past any retry path.
    ///
    /// An auth-failure status here is terminal: the identity cache is
    /// cleared and the session-expired handler runs before the error returns.
    pub async fn handle_response(&self, response: Response) -> Result<Value, Error> {
        let status = response.status();
        if self.policy.is_auth_failure(status) {
            return Err(self.expire_session(status));
        }
        let text = response.text().await?;
        let result = normalize_body(status, &text);
        if let Err(err) = &result {
            warn!(status = status.as_u16(), error = %err, "response.error");
        }
        result
    }

    async fn send_with_refresh(&self, request: &ApiRequest) -> Result<Response, Error> {
        let url = request.resolve_url(&self.base_url);
        let headers = request.effective_headers();

        let response = self.dispatch(request, &url, &headers).await?;
        let status = response.status();
        if !self.policy.is_auth_failure(status) {
            return Ok(response);
        }
        warn!(
            method = %request.method(),
            url = %url,
            status = status.as_u16(),
            "auth.failure"
        );
        if !self.renew_session().await.is_renewed() {
            return Ok(response);
        }
        info!(method = %request.method(), url = %url, "request.retry");
        self.dispatch(request, &url, &headers).await
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<Response, Error> {
        let mut builder = self
            .http
            .request(request.method().clone(), url)
            .headers(headers.clone());
        if let Some(body) = request.body_text() {
            builder = builder.body(body.to_string());
        }
        debug!(method = %request.method(), url, "request.send");
        builder.send().await.map_err(|err| {
            error!(method = %request.method(), url, error = %err, "request.transport_error");
            Error::Transport(err)
        })
    }

    async fn renew_session(&self) -> RefreshOutcome {
        let http = self.http.clone();
        let url = ApiRequest::post(self.refresh_path.as_str()).resolve_url(&self.base_url);
        self.refresh_lock
            .refresh_or_join(move |telemetry| refresh_session(http, url, telemetry))
            .await
    }

    fn expire_session(&self, status: StatusCode) -> Error {
        warn!(
            status = status.as_u16(),
            landing_route = %self.landing_route,
            "session.expired"
        );
        if let Err(err) = self.identity.clear() {
            warn!(error = %err, "identity.clear_failed");
        }
        self.on_expired.session_expired(&self.landing_route);
        Error::SessionExpired
    }
}

/// The refresh call bypasses `send`, so its own auth failure cannot recurse.
async fn refresh_session(http: Client, url: String, telemetry: RefreshTelemetry) -> RefreshOutcome {
    telemetry.emit_start(&url, SystemTime::now());
    let outcome = match http.post(&url).send().await {
        Ok(resp) if resp.status().is_success() => RefreshOutcome::Renewed,
        Ok(resp) => RefreshOutcome::Rejected(resp.status()),
        Err(err) => RefreshOutcome::Unreachable(err.to_string()),
    };
    telemetry.emit_outcome(&outcome, SystemTime::now());
    outcome
}
