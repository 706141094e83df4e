//! Hosted database client

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::SESSION_LIST_LIMIT;
use crate::api::{ApiSettings, ChatMessage, RecordId, Session, SessionId};
use crate::backend::{BackendError, BackendResult, ChatBackend};
use crate::client::{ApiClient, ClientConfig, RequestOptions, Transport};
use crate::config::HostedConfig;

/// A row of the `api_config` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfigRow {
    pub id: RecordId,
    #[serde(flatten)]
    pub settings: ApiSettings,
}

#[derive(Debug, Serialize)]
struct ConfigWrite<'a> {
    api_url: &'a str,
    api_key: &'a str,
    model_name: &'a str,
    updated_at: String,
}

#[derive(Debug, Serialize)]
struct MessageWrite<'a> {
    session_id: &'a SessionId,
    role: &'a str,
    content: &'a str,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct SessionWrite<'a> {
    session_name: &'a str,
    created_at: String,
}

/// Client for the hosted database tables
pub struct HostedClient<T> {
    inner: ApiClient<T>,
    anon_key: String,
}

impl<T: Transport> HostedClient<T> {
    /// Create a client; both the project URL and the anon key are required
    pub fn new(config: &HostedConfig, transport: T) -> BackendResult<Self> {
        if !config.is_configured() {
            return Err(BackendError::NotConfigured);
        }
        let url = config.url.trim();
        let anon_key = config.anon_key.trim();

        let client_config = ClientConfig {
            base_url: format!("{}/rest/v1", url.trim_end_matches('/')),
            ..ClientConfig::default()
        };
        let inner = ApiClient::with_transport(client_config, transport)
            .with_token(Some(anon_key.to_string()));

        Ok(Self {
            inner,
            anon_key: anon_key.to_string(),
        })
    }

    pub fn transport(&self) -> &T {
        self.inner.transport()
    }

    /// First row of `api_config`, if any
    pub async fn api_config(&self) -> BackendResult<Option<ApiConfigRow>> {
        let rows: Vec<ApiConfigRow> = self
            .fetch("/api_config?select=*&limit=1", RequestOptions::get())
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Update the existing `api_config` row, or insert the first one
    pub async fn save_api_config(
        &self,
        api_url: &str,
        api_key: &str,
        model_name: &str,
    ) -> BackendResult<ApiConfigRow> {
        let write = ConfigWrite {
            api_url,
            api_key,
            model_name,
            updated_at: Utc::now().to_rfc3339(),
        };

        let (endpoint, options) = match self.api_config().await? {
            Some(existing) => (
                format!("/api_config?id=eq.{}", urlencoding::encode(&existing.id.to_string())),
                RequestOptions::post_json(&write)?.method(Method::PATCH),
            ),
            None => ("/api_config".to_string(), RequestOptions::post_json(&write)?),
        };

        let rows: Vec<ApiConfigRow> = self.fetch(&endpoint, options.header("Prefer", "return=representation")).await?;
        rows.into_iter().next().ok_or(BackendError::EmptyResult("api_config"))
    }

    pub async fn save_message(
        &self,
        session_id: &SessionId,
        role: &str,
        content: &str,
    ) -> BackendResult<ChatMessage> {
        let write = MessageWrite {
            session_id,
            role,
            content,
            created_at: Utc::now().to_rfc3339(),
        };
        let options = RequestOptions::post_json(&write)?.header("Prefer", "return=representation");
        let rows: Vec<ChatMessage> = self.fetch("/chat_messages", options).await?;
        rows.into_iter().next().ok_or(BackendError::EmptyResult("chat_messages"))
    }

    pub async fn session_messages(&self, session_id: &SessionId) -> BackendResult<Vec<ChatMessage>> {
        let endpoint = format!(
            "/chat_messages?select=*&session_id=eq.{}&order=created_at.asc",
            urlencoding::encode(&session_id.to_string())
        );
        self.fetch(&endpoint, RequestOptions::get()).await
    }

    pub async fn insert_session(&self, session_name: &str) -> BackendResult<Session> {
        let write = SessionWrite {
            session_name,
            created_at: Utc::now().to_rfc3339(),
        };
        let options = RequestOptions::post_json(&write)?.header("Prefer", "return=representation");
        let rows: Vec<Session> = self.fetch("/chat_sessions", options).await?;
        rows.into_iter().next().ok_or(BackendError::EmptyResult("chat_sessions"))
    }

    pub async fn recent_sessions(&self) -> BackendResult<Vec<Session>> {
        let endpoint = format!(
            "/chat_sessions?select=*&order=created_at.desc&limit={}",
            SESSION_LIST_LIMIT
        );
        self.fetch(&endpoint, RequestOptions::get()).await
    }

    async fn fetch<R: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> BackendResult<R> {
        let options = options.header("apikey", self.anon_key.as_str());
        Ok(self.inner.request(endpoint, options).await?)
    }
}

#[async_trait]
impl<T: Transport> ChatBackend for HostedClient<T> {
    fn name(&self) -> &str {
        "hosted"
    }

    async fn load_settings(&self) -> BackendResult<Option<ApiSettings>> {
        Ok(self.api_config().await?.map(|row| row.settings))
    }

    async fn save_settings(
        &self,
        api_url: &str,
        api_key: &str,
        model_name: &str,
    ) -> BackendResult<Option<ApiSettings>> {
        let row = self.save_api_config(api_url, api_key, model_name).await?;
        Ok(Some(row.settings))
    }

    async fn create_session(&self, session_name: &str) -> BackendResult<Session> {
        self.insert_session(session_name).await
    }

    async fn sessions(&self) -> BackendResult<Vec<Session>> {
        self.recent_sessions().await
    }

    async fn messages(&self, session_id: &SessionId) -> BackendResult<Vec<ChatMessage>> {
        self.session_messages(session_id).await
    }

    async fn record_turn(&self, session_id: &SessionId, role: &str, content: &str) -> BackendResult<()> {
        self.save_message(session_id, role, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::mock::MockTransport;
    use serde_json::json;

    fn hosted(transport: MockTransport) -> HostedClient<MockTransport> {
        let config = HostedConfig {
            url: "https://proj.db.example/".to_string(),
            anon_key: "anon-123".to_string(),
        };
        HostedClient::new(&config, transport).unwrap()
    }

    #[test]
    fn test_requires_url_and_key() {
        let config = HostedConfig::default();
        let result = HostedClient::new(&config, MockTransport::new());
        assert!(matches!(result, Err(BackendError::NotConfigured)));

        let blank_key = HostedConfig {
            url: "https://proj.db.example".to_string(),
            anon_key: "   ".to_string(),
        };
        assert!(!blank_key.is_configured());
        let result = HostedClient::new(&blank_key, MockTransport::new());
        assert!(matches!(result, Err(BackendError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_empty_config_table_is_none() {
        let client = hosted(MockTransport::new().reply_json(200, json!([])));
        assert!(client.load_settings().await.unwrap().is_none());

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "https://proj.db.example/rest/v1/api_config?select=*&limit=1");
        assert_eq!(sent.header("apikey"), Some("anon-123"));
        assert_eq!(sent.header("authorization"), Some("Bearer anon-123"));
    }

    #[tokio::test]
    async fn test_save_config_updates_existing_row() {
        let row = json!({"id": 4, "api_url": "https://llm.example", "api_key": "k", "model_name": "m1"});
        let updated = json!([{"id": 4, "api_url": "https://llm.example", "api_key": "k2", "model_name": "m2"}]);
        let client = hosted(
            MockTransport::new()
                .reply_json(200, json!([row]))
                .reply_json(200, updated),
        );

        let saved = client
            .save_settings("https://llm.example", "k2", "m2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.model_name, "m2");

        let sent = client.transport().requests();
        assert_eq!(sent[1].method, Method::PATCH);
        assert_eq!(sent[1].url, "https://proj.db.example/rest/v1/api_config?id=eq.4");
        assert_eq!(sent[1].header("prefer"), Some("return=representation"));
    }

    #[tokio::test]
    async fn test_save_config_inserts_first_row() {
        let client = hosted(
            MockTransport::new()
                .reply_json(200, json!([]))
                .reply_json(201, json!([{"id": 1, "api_url": "u", "model_name": "m"}])),
        );

        client.save_settings("u", "k", "m").await.unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent[1].method, Method::POST);
        assert_eq!(sent[1].url, "https://proj.db.example/rest/v1/api_config");
        let body: serde_json::Value = serde_json::from_str(sent[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["api_key"], "k");
        assert!(body["updated_at"].is_string());
    }

    #[tokio::test]
    async fn test_message_listing_filters_and_orders() {
        let client = hosted(MockTransport::new().reply_json(
            200,
            json!([{"session_id": 9, "role": "user", "content": "hi", "created_at": "2026-10-19T08:00:00Z"}]),
        ));

        let messages = client.messages(&SessionId::new("9")).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            client.transport().requests()[0].url,
            "https://proj.db.example/rest/v1/chat_messages?select=*&session_id=eq.9&order=created_at.asc"
        );
    }

    #[tokio::test]
    async fn test_save_message_returns_inserted_row() {
        let client = hosted(MockTransport::new().reply_json(
            201,
            json!([{"id": 70, "session_id": 9, "role": "assistant", "content": "Take a slow breath."}]),
        ));

        let saved = client
            .save_message(&SessionId::from(9), "assistant", "Take a slow breath.")
            .await
            .unwrap();
        assert_eq!(saved.session_id, Some(SessionId::from(9)));

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "https://proj.db.example/rest/v1/chat_messages");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["session_id"], 9);
        assert_eq!(body["role"], "assistant");
    }

    #[tokio::test]
    async fn test_empty_insert_result_is_an_error() {
        let client = hosted(MockTransport::new().reply_json(201, json!([])));
        let err = client.create_session("Evening check-in").await.unwrap_err();
        assert!(matches!(err, BackendError::EmptyResult("chat_sessions")));
    }

    #[tokio::test]
    async fn test_session_listing_is_newest_first_and_limited() {
        let client = hosted(MockTransport::new().reply_json(200, json!([])));
        client.sessions().await.unwrap();
        assert_eq!(
            client.transport().requests()[0].url,
            "https://proj.db.example/rest/v1/chat_sessions?select=*&order=created_at.desc&limit=50"
        );
    }

    #[tokio::test]
    async fn test_gateway_error_message_surfaces() {
        let client = hosted(
            MockTransport::new().reply_json(401, json!({"message": "Invalid API key", "hint": null})),
        );
        let err = client.sessions().await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid API key");
    }
}
