//! Backend-stored AI provider settings

use super::dto::{ApiSettings, ConfigStatus, SaveConfigRequest, SaveConfigResponse};
use crate::client::{ApiClient, ClientResult, RequestOptions, Transport};

pub struct ConfigApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ConfigApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /config`
    pub async fn get(&self) -> ClientResult<ConfigStatus> {
        self.client.request("/config", RequestOptions::get()).await
    }

    /// `POST /config`
    pub async fn save(&self, api_url: &str, api_key: &str, model_name: &str) -> ClientResult<Option<ApiSettings>> {
        let body = SaveConfigRequest {
            api_url,
            api_key,
            model_name,
        };
        let response: SaveConfigResponse = self
            .client
            .request("/config", RequestOptions::post_json(&body)?)
            .await?;
        Ok(response.config)
    }
}
