//! Chat storage backends
//!
//! The storage-shaped operations (provider settings, sessions, messages) can
//! be served by either the REST backend or the hosted database. The AI round
//! trip itself (`POST /chat`) is only available from the REST backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{ApiSettings, ChatMessage, Session, SessionId};
use crate::client::{ApiClient, ClientError, Transport};

/// Errors from a chat storage backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Hosted database is not configured (set hosted.url and hosted.anon_key)")]
    NotConfigured,

    #[error("{0} returned no rows")]
    EmptyResult(&'static str),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Common trait for the REST backend and the hosted database
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short name used in logs and CLI output
    fn name(&self) -> &str;

    /// Stored provider settings, `None` when nothing is stored yet
    async fn load_settings(&self) -> BackendResult<Option<ApiSettings>>;

    async fn save_settings(
        &self,
        api_url: &str,
        api_key: &str,
        model_name: &str,
    ) -> BackendResult<Option<ApiSettings>>;

    async fn create_session(&self, session_name: &str) -> BackendResult<Session>;

    /// Sessions, newest first
    async fn sessions(&self) -> BackendResult<Vec<Session>>;

    /// Messages of a session, oldest first
    async fn messages(&self, session_id: &SessionId) -> BackendResult<Vec<ChatMessage>>;

    /// Persist one conversation turn
    ///
    /// The REST backend stores turns itself as part of `POST /chat`, so the
    /// default does nothing.
    async fn record_turn(&self, _session_id: &SessionId, _role: &str, _content: &str) -> BackendResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: Transport> ChatBackend for ApiClient<T> {
    fn name(&self) -> &str {
        "rest"
    }

    async fn load_settings(&self) -> BackendResult<Option<ApiSettings>> {
        Ok(self.settings().get().await?.into_settings())
    }

    async fn save_settings(
        &self,
        api_url: &str,
        api_key: &str,
        model_name: &str,
    ) -> BackendResult<Option<ApiSettings>> {
        Ok(self.settings().save(api_url, api_key, model_name).await?)
    }

    async fn create_session(&self, session_name: &str) -> BackendResult<Session> {
        Ok(self.chat().create_session(session_name).await?)
    }

    async fn sessions(&self) -> BackendResult<Vec<Session>> {
        Ok(self.chat().sessions().await?)
    }

    async fn messages(&self, session_id: &SessionId) -> BackendResult<Vec<ChatMessage>> {
        Ok(self.chat().messages(session_id).await?)
    }
}
