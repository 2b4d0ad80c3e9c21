use crate::{
    ApiClient,
    errors::Error,
    request::ApiRequest,
    types::{Budget, BudgetRequest, Message},
};

pub struct Budgets<'a> {
    pub(super) client: &'a ApiClient,
}

impl Budgets<'_> {
    /// Spent amounts and percentages come precomputed from the backend.
    pub async fn list(&self) -> Result<Vec<Budget>, Error> {
        self.client.send_as(ApiRequest::get("/budgets")).await
    }

    /// Creates or replaces the limit for a category.
    pub async fn set(&self, category_id: i64, amount: f64) -> Result<Message, Error> {
        let body = BudgetRequest {
            category_id,
            amount,
        };
        self.client
            .send_as(ApiRequest::post("/budgets").json(&body)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<Message, Error> {
        self.client
            .send_as(ApiRequest::delete(format!("/budgets/{id}")))
            .await
    }
}
