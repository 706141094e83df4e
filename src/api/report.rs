//! Report endpoints

use super::dto::{Report, ReportListResponse, ReportResponse};
use super::period_query;
use crate::client::{ApiClient, ClientResult, RequestOptions, Transport};

pub struct ReportApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ReportApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Generate a report for `period` (e.g., "week")
    pub async fn generate(&self, period: &str) -> ClientResult<Report> {
        let endpoint = format!("/reports/generate{}", period_query(period));
        let response: ReportResponse = self.client.request(&endpoint, RequestOptions::get()).await?;
        Ok(response.report)
    }

    pub async fn list(&self) -> ClientResult<Vec<Report>> {
        let response: ReportListResponse =
            self.client.request("/reports", RequestOptions::get()).await?;
        Ok(response.reports)
    }
}
