//! HTTP Transport
//!
//! The seam between the request client and the network. The client only
//! needs "send this request, give me status + body"; everything else
//! (timeouts, error mapping) lives above this trait.

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::BTreeMap;
use thiserror::Error;

/// A fully-built outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Header names are stored lowercased
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }
}

/// A received response with its body fully read
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS failure, ...
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// Sends one HTTP request
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted in-memory transport for headless tests.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    enum Scripted {
        Reply(Result<HttpResponse, TransportError>),
        Hang,
    }

    /// Replays queued responses in order and records every request
    #[derive(Default)]
    pub struct MockTransport {
        script: Mutex<VecDeque<Scripted>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply_json(self, status: u16, body: serde_json::Value) -> Self {
            self.reply_raw(status, reason(status), &body.to_string())
        }

        pub fn reply_raw(self, status: u16, status_text: &str, body: &str) -> Self {
            self.push(Scripted::Reply(Ok(HttpResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            })))
        }

        pub fn fail(self, error: TransportError) -> Self {
            self.push(Scripted::Reply(Err(error)))
        }

        /// Next request never completes
        pub fn hang(self) -> Self {
            self.push(Scripted::Hang)
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn push(self, item: Scripted) -> Self {
            self.script.lock().unwrap().push_back(item);
            self
        }
    }

    fn reason(status: u16) -> &'static str {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Scripted::Reply(reply)) => reply,
                Some(Scripted::Hang) => std::future::pending().await,
                None => panic!("unexpected request: {} {}", request.method, request.url),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let request = HttpRequest {
            method: Method::GET,
            url: "http://localhost/api/config".to_string(),
            headers,
            body: None,
        };
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("authorization"), None);
    }

    #[tokio::test]
    async fn test_reqwest_refused_connection_is_connect_error() {
        let request = HttpRequest {
            method: Method::GET,
            url: "http://127.0.0.1:1/api/config".to_string(),
            headers: BTreeMap::new(),
            body: None,
        };

        let err = ReqwestTransport::new().send(request).await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "got {:?}", err);
    }

    #[test]
    fn test_response_success_range() {
        let mut response = HttpResponse {
            status: 204,
            status_text: "No Content".to_string(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
    }
}
