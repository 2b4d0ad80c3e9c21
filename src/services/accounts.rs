use crate::{
    ApiClient,
    errors::Error,
    request::ApiRequest,
    types::{Account, NewAccount},
};

pub struct Accounts<'a> {
    pub(super) client: &'a ApiClient,
}

impl Accounts<'_> {
    pub async fn list(&self) -> Result<Vec<Account>, Error> {
        self.client.send_as(ApiRequest::get("/accounts")).await
    }

    pub async fn get(&self, id: i64) -> Result<Account, Error> {
        self.client
            .send_as(ApiRequest::get(format!("/accounts/{id}")))
            .await
    }

    pub async fn create(&self, account: &NewAccount) -> Result<Account, Error> {
        self.client
            .send_as(ApiRequest::post("/accounts").json(account)?)
            .await
    }

    /// Replaces name, type and balance; the backend has no partial update.
    pub async fn update(&self, id: i64, account: &NewAccount) -> Result<Account, Error> {
        self.client
            .send_as(ApiRequest::put(format!("/accounts/{id}")).json(account)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.client
            .send(ApiRequest::delete(format!("/accounts/{id}")))
            .await
            .map(|_| ())
    }
}
