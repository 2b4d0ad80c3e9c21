use serde_json::json;
use urlencoding::encode;

use crate::{ApiClient, errors::Error, request::ApiRequest, types::Message};

/// Password recovery. The backend answers with plain text, which arrives as
/// a [`Message`].
pub struct Recovery<'a> {
    pub(super) client: &'a ApiClient,
}

impl Recovery<'_> {
    pub async fn request_code(&self, email: &str) -> Result<Message, Error> {
        let path = format!("/user/recover/request?email={}", encode(email));
        self.client.send_as(ApiRequest::post(path)).await
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> Result<Message, Error> {
        let path = format!(
            "/user/recover/verify?email={}&code={}",
            encode(email),
            encode(code)
        );
        self.client.send_as(ApiRequest::post(path)).await
    }

    pub async fn reset(&self, email: &str, new_password: &str, code: &str) -> Result<Message, Error> {
        let body = json!({
            "email": email,
            "newPassword": new_password,
            "code": code,
        });
        self.client
            .send_as(ApiRequest::post("/user/recover/reset").json(&body)?)
            .await
    }
}
