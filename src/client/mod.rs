//! Request Client
//!
//! Issues one HTTP request against the MoodMate backend, merges default and
//! caller-supplied headers, enforces a per-request deadline and normalizes
//! every failure into a [`ClientError`].
//!
//! # Timeouts
//!
//! - `/chat` (the AI round trip): 95 seconds by default
//! - everything else: 30 seconds by default
//!
//! # Example
//!
//! ```rust,no_run
//! use moodmate::client::{ApiClient, ClientConfig, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default());
//!     let sessions: serde_json::Value = client.request("/sessions", RequestOptions::get()).await?;
//!     println!("{}", sessions);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod transport;

pub use error::{ClientError, ClientResult, GENERIC_FAILURE};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Path of the long-running AI chat endpoint
pub const CHAT_ENDPOINT: &str = "/chat";

/// Configuration for the request client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL prepended to every endpoint (e.g., "http://localhost:3000/api")
    pub base_url: String,
    /// Deadline for the chat endpoint
    pub chat_timeout: Duration,
    /// Deadline for every other endpoint
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            chat_timeout: Duration::from_secs(95),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Per-call options: method, body and extra headers
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::get()
        }
    }

    /// POST with a JSON-serialized body
    pub fn post_json<B: Serialize + ?Sized>(body: &B) -> ClientResult<Self> {
        let body = serde_json::to_string(body)
            .map_err(|e| ClientError::Unexpected(format!("failed to encode request: {}", e)))?;
        Ok(Self {
            body: Some(body),
            ..Self::post()
        })
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP client for the MoodMate REST backend
pub struct ApiClient<T = ReqwestTransport> {
    transport: T,
    config: ClientConfig,
    token: Option<String>,
}

impl ApiClient<ReqwestTransport> {
    /// Create a client using the reqwest transport
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(mut config: ClientConfig, transport: T) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            transport,
            config,
            token: None,
        }
    }

    /// Attach a bearer token to every subsequent request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deadline applied to a request for `endpoint`
    pub fn timeout_for(&self, endpoint: &str) -> Duration {
        if is_chat_endpoint(endpoint) {
            self.config.chat_timeout
        } else {
            self.config.request_timeout
        }
    }

    /// Perform one request and decode the JSON response body
    ///
    /// An empty success body decodes as JSON `null`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<R> {
        let body = self.execute(endpoint, options).await?;
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };

        serde_json::from_str(text).map_err(|e| {
            let err = ClientError::Unexpected(format!("failed to parse response: {}", e));
            tracing::error!(endpoint = %endpoint, error = %err, "API error");
            err
        })
    }

    async fn execute(&self, endpoint: &str, options: RequestOptions) -> ClientResult<String> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let request = self.build_request(endpoint, options, &request_id);
        let deadline = self.timeout_for(endpoint);

        tracing::debug!(
            request_id = %request_id,
            method = %request.method,
            url = %request.url,
            timeout_secs = deadline.as_secs(),
            "Sending request"
        );

        let outcome = match tokio::time::timeout(deadline, self.transport.send(request)).await {
            Err(_) => Err(ClientError::Timeout),
            Ok(Err(TransportError::Connect(detail))) => {
                tracing::debug!(request_id = %request_id, detail = %detail, "Connection failed");
                Err(ClientError::Connectivity {
                    base_url: self.config.base_url.clone(),
                })
            }
            Ok(Err(TransportError::Other(detail))) => Err(ClientError::Unexpected(detail)),
            Ok(Ok(response)) if response.is_success() => Ok(response.body),
            Ok(Ok(response)) => Err(error_from_response(&response)),
        };

        if let Err(e) = &outcome {
            tracing::error!(
                request_id = %request_id,
                endpoint = %endpoint,
                error = %e,
                "API error"
            );
        }

        outcome
    }

    fn build_request(&self, endpoint: &str, options: RequestOptions, request_id: &str) -> HttpRequest {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers.insert("x-request-id".to_string(), request_id.to_string());
        if let Some(token) = &self.token {
            headers.insert("authorization".to_string(), format!("Bearer {}", token));
        }
        for (name, value) in options.headers {
            headers.insert(name.to_ascii_lowercase(), value);
        }

        HttpRequest {
            method: options.method,
            url: format!("{}{}", self.config.base_url, endpoint),
            headers,
            body: options.body,
        }
    }
}

/// Whether `endpoint` is the chat endpoint (query string ignored)
pub fn is_chat_endpoint(endpoint: &str) -> bool {
    let path = endpoint.split('?').next().unwrap_or(endpoint);
    path.trim_end_matches('/') == CHAT_ENDPOINT
}

/// Build the error for a non-success response
///
/// A JSON object body yields its `error` or `message` field; any other body
/// (non-JSON, `null`, arrays, scalars) yields the status line.
pub fn error_from_response(response: &HttpResponse) -> ClientError {
    let message = match serde_json::from_str::<serde_json::Value>(&response.body) {
        Ok(value) if value.is_object() => ["error", "message"]
            .iter()
            .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
            .find(|s| !s.is_empty())
            .unwrap_or(GENERIC_FAILURE)
            .to_string(),
        _ => format!("HTTP {}: {}", response.status, response.status_text),
    };

    ClientError::Api {
        status: response.status,
        message,
    }
}
