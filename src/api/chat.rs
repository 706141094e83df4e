//! Chat and session endpoints

use super::dto::{
    ChatMessage, ChatReply, CreateSessionRequest, HistoryEntry, MessageListResponse,
    SendMessageRequest, Session, SessionId, SessionListResponse, SessionResponse,
};
use crate::client::{ApiClient, ClientResult, RequestOptions, Transport, CHAT_ENDPOINT};

pub struct ChatApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> ChatApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Send a message; the backend relays it to the configured AI provider
    pub async fn send_message(
        &self,
        message: &str,
        session_id: &SessionId,
        history: &[HistoryEntry],
    ) -> ClientResult<ChatReply> {
        let body = SendMessageRequest {
            message,
            session_id,
            history,
        };
        self.client
            .request(CHAT_ENDPOINT, RequestOptions::post_json(&body)?)
            .await
    }

    pub async fn create_session(&self, session_name: &str) -> ClientResult<Session> {
        let body = CreateSessionRequest { session_name };
        let response: SessionResponse = self
            .client
            .request("/sessions", RequestOptions::post_json(&body)?)
            .await?;
        Ok(response.session)
    }

    pub async fn sessions(&self) -> ClientResult<Vec<Session>> {
        let response: SessionListResponse =
            self.client.request("/sessions", RequestOptions::get()).await?;
        Ok(response.sessions)
    }

    pub async fn messages(&self, session_id: &SessionId) -> ClientResult<Vec<ChatMessage>> {
        let endpoint = format!("/sessions/{}/messages", urlencoding::encode(&session_id.to_string()));
        let response: MessageListResponse =
            self.client.request(&endpoint, RequestOptions::get()).await?;
        Ok(response.messages)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::transport::mock::MockTransport;
    use crate::client::{ApiClient, ClientConfig};
    use crate::api::{HistoryEntry, SessionId};
    use serde_json::json;

    #[tokio::test]
    async fn test_send_message_body() {
        let transport = MockTransport::new().reply_json(200, json!({"message": "Hi there"}));
        let client = ApiClient::with_transport(ClientConfig::default(), transport);

        let history = vec![HistoryEntry {
            role: "user".to_string(),
            content: "earlier".to_string(),
        }];
        let reply = client
            .chat()
            .send_message("hello", &SessionId::from(12), &history)
            .await
            .unwrap();
        assert_eq!(reply.message, "Hi there");

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "http://localhost:3000/api/chat");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "hello",
                "session_id": 12,
                "history": [{"role": "user", "content": "earlier"}]
            })
        );
    }

    #[tokio::test]
    async fn test_messages_path_is_encoded() {
        let transport = MockTransport::new().reply_json(200, json!({"messages": []}));
        let client = ApiClient::with_transport(ClientConfig::default(), transport);

        let messages = client.chat().messages(&SessionId::new("a b/c")).await.unwrap();
        assert!(messages.is_empty());
        assert_eq!(
            client.transport().requests()[0].url,
            "http://localhost:3000/api/sessions/a%20b%2Fc/messages"
        );
    }
}
