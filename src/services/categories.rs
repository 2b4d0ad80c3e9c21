use crate::{
    ApiClient,
    errors::Error,
    request::ApiRequest,
    types::{Category, NewCategory},
};

pub struct Categories<'a> {
    pub(super) client: &'a ApiClient,
}

impl Categories<'_> {
    pub async fn list(&self) -> Result<Vec<Category>, Error> {
        self.client.send_as(ApiRequest::get("/categories")).await
    }

    pub async fn create(&self, category: &NewCategory) -> Result<Category, Error> {
        self.client
            .send_as(ApiRequest::post("/categories").json(category)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.client
            .send(ApiRequest::delete(format!("/categories/{id}")))
            .await
            .map(|_| ())
    }
}
