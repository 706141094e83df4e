//! Account endpoints

use super::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::client::{ApiClient, ClientResult, RequestOptions, Transport};

pub struct AuthApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest { username, password };
        self.client
            .request("/auth/login", RequestOptions::post_json(&body)?)
            .await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> ClientResult<serde_json::Value> {
        let body = RegisterRequest {
            username,
            email,
            password,
        };
        self.client
            .request("/auth/register", RequestOptions::post_json(&body)?)
            .await
    }

    pub async fn logout(&self) -> ClientResult<()> {
        let _: serde_json::Value = self
            .client
            .request("/auth/logout", RequestOptions::post())
            .await?;
        Ok(())
    }
}
