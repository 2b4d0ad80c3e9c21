use crate::{
    ApiClient,
    errors::Error,
    request::ApiRequest,
    types::{
        CategoryStat, Message, MonthlyStat, RecurringTransaction, Transaction, TransactionRequest,
    },
};

pub struct Transactions<'a> {
    pub(super) client: &'a ApiClient,
}

impl Transactions<'_> {
    pub async fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.client.send_as(ApiRequest::get("/transactions")).await
    }

    pub async fn list_by_account(&self, account_id: i64) -> Result<Vec<Transaction>, Error> {
        self.client
            .send_as(ApiRequest::get(format!("/transactions/account/{account_id}")))
            .await
    }

    pub async fn create(&self, transaction: &TransactionRequest) -> Result<Transaction, Error> {
        self.client
            .send_as(ApiRequest::post("/transactions").json(transaction)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.client
            .send(ApiRequest::delete(format!("/transactions/{id}")))
            .await
            .map(|_| ())
    }

    pub async fn category_stats(&self) -> Result<Vec<CategoryStat>, Error> {
        self.client
            .send_as(ApiRequest::get("/transactions/stats/categories"))
            .await
    }

    pub async fn monthly_stats(&self) -> Result<Vec<MonthlyStat>, Error> {
        self.client
            .send_as(ApiRequest::get("/transactions/stats/monthly"))
            .await
    }
}

/// Scheduling and due dates are owned by the backend; this only manages the templates.
pub struct RecurringTransactions<'a> {
    pub(super) client: &'a ApiClient,
}

impl RecurringTransactions<'_> {
    pub async fn list(&self) -> Result<Vec<RecurringTransaction>, Error> {
        self.client
            .send_as(ApiRequest::get("/transactions/recurring"))
            .await
    }

    pub async fn create(&self, template: &TransactionRequest) -> Result<Message, Error> {
        self.client
            .send_as(ApiRequest::post("/transactions/recurring").json(template)?)
            .await
    }

    pub async fn cancel(&self, id: i64) -> Result<Message, Error> {
        self.client
            .send_as(ApiRequest::delete(format!("/transactions/recurring/{id}")))
            .await
    }
}
