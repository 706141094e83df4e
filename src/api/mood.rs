//! Mood logging endpoints

use super::dto::{MoodEntry, MoodRecord, MoodRecordListResponse, MoodTrend, MoodTrendResponse};
use super::period_query;
use crate::client::{ApiClient, ClientResult, RequestOptions, Transport};

pub struct MoodApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> MoodApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `POST /mood/record`; the response shape is backend-defined
    pub async fn record(&self, entry: &MoodEntry) -> ClientResult<serde_json::Value> {
        self.client
            .request("/mood/record", RequestOptions::post_json(entry)?)
            .await
    }

    pub async fn records(&self) -> ClientResult<Vec<MoodRecord>> {
        let response: MoodRecordListResponse =
            self.client.request("/mood/records", RequestOptions::get()).await?;
        Ok(response.records)
    }

    pub async fn trends(&self, period: &str) -> ClientResult<Vec<MoodTrend>> {
        let endpoint = format!("/mood/trends{}", period_query(period));
        let response: MoodTrendResponse = self.client.request(&endpoint, RequestOptions::get()).await?;
        Ok(response.trends)
    }
}
