use serde_json::json;
use tracing::warn;

use crate::{
    ApiClient,
    errors::Error,
    request::ApiRequest,
    session::Identity,
    types::{LoginRequest, Message, RegisterRequest, UserProfile},
};

/// Account lifecycle and profile. Login and refresh set session cookies,
/// which the client's cookie store forwards on later calls.
pub struct User<'a> {
    pub(super) client: &'a ApiClient,
}

impl User<'_> {
    /// Logs in and caches the email until the profile is fetched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Message, Error> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result: Message = self
            .client
            .send_as(ApiRequest::post("/user/login").json(&body)?)
            .await?;
        let identity = Identity {
            email: Some(body.email),
            ..self.client.identity().load().unwrap_or_default()
        };
        if let Err(err) = self.client.identity().store(&identity) {
            warn!(error = %err, "identity.store_failed");
        }
        Ok(result)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Message, Error> {
        self.client
            .send_as(ApiRequest::post("/user/register").json(request)?)
            .await
    }

    /// Clears the local identity even when the server call fails.
    pub async fn logout(&self) -> Result<Message, Error> {
        let result = self.client.send_as(ApiRequest::post("/user/logout")).await;
        if let Err(err) = self.client.identity().clear() {
            warn!(error = %err, "identity.clear_failed");
        }
        result
    }

    /// Fetches the profile and caches name and email locally.
    pub async fn profile(&self) -> Result<UserProfile, Error> {
        let profile: UserProfile = self.client.send_as(ApiRequest::get("/user/profile")).await?;
        let identity = Identity {
            name: profile.name.clone(),
            email: profile.email.clone(),
        };
        if let Err(err) = self.client.identity().store(&identity) {
            warn!(error = %err, "identity.store_failed");
        }
        Ok(profile)
    }

    pub async fn update_name(&self, new_name: &str) -> Result<Message, Error> {
        let result: Message = self
            .client
            .send_as(ApiRequest::patch("/user/profile/name").json(&json!({ "newName": new_name }))?)
            .await?;
        let mut identity = self.client.identity().load().unwrap_or_default();
        identity.name = Some(new_name.to_string());
        if let Err(err) = self.client.identity().store(&identity) {
            warn!(error = %err, "identity.store_failed");
        }
        Ok(result)
    }
}
