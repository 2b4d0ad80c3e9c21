use jiff::civil::Date;

use crate::{ApiClient, errors::Error, request::ApiRequest};

pub struct Export<'a> {
    pub(super) client: &'a ApiClient,
}

impl Export<'_> {
    /// Downloads the transactions spreadsheet (`.xlsx` bytes), optionally
    /// bounded by an inclusive date range.
    pub async fn excel(&self, start: Option<Date>, end: Option<Date>) -> Result<Vec<u8>, Error> {
        let params: Vec<String> = [("startDate", start), ("endDate", end)]
            .into_iter()
            .filter_map(|(key, date)| date.map(|date| format!("{key}={date}")))
            .collect();
        let path = if params.is_empty() {
            "/export/excel".to_string()
        } else {
            format!("/export/excel?{}", params.join("&"))
        };
        self.client.send_bytes(ApiRequest::get(path)).await
    }
}
