use serde_json::json;

use crate::{
    ApiClient,
    errors::Error,
    request::ApiRequest,
    types::{Message, NewSavingsGoal, SavingsGoal},
};

pub struct Goals<'a> {
    pub(super) client: &'a ApiClient,
}

impl Goals<'_> {
    pub async fn list(&self) -> Result<Vec<SavingsGoal>, Error> {
        self.client.send_as(ApiRequest::get("/goals")).await
    }

    pub async fn create(&self, goal: &NewSavingsGoal) -> Result<SavingsGoal, Error> {
        self.client
            .send_as(ApiRequest::post("/goals").json(goal)?)
            .await
    }

    pub async fn add_funds(&self, id: i64, amount: f64) -> Result<Message, Error> {
        self.client
            .send_as(ApiRequest::put(format!("/goals/{id}/add")).json(&json!({ "amount": amount }))?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.client
            .send(ApiRequest::delete(format!("/goals/{id}")))
            .await
            .map(|_| ())
    }
}
