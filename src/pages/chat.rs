//! Chat Page
//!
//! Provider settings, session bootstrap and the message round trip.
//!
//! The page keeps its own state: the session id created on the first send is
//! reused for every later send until the page is dropped.
//!
//! Settings, sessions and history come from a [`ChatBackend`]; the AI round
//! trip always goes through the REST client.

use chrono::{DateTime, Utc};

use crate::api::{ApiSettings, ChatMessage, HistoryEntry, SessionId};
use crate::backend::{BackendResult, ChatBackend};
use crate::client::{ApiClient, ClientError, Transport};
use crate::format::format_date_time;
use crate::notice::Notice;

pub const CHAT_TIMEOUT_MESSAGE: &str =
    "The request timed out; the AI is taking longer than usual to respond. Please try again later.";
pub const CHAT_UNREACHABLE_MESSAGE: &str =
    "Cannot reach the server. Make sure the backend is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    User,
    Assistant,
}

impl EntryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryRole::User => "user",
            EntryRole::Assistant => "assistant",
        }
    }
}

/// One rendered line of the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub role: EntryRole,
    pub content: String,
    pub is_error: bool,
    pub at: DateTime<Utc>,
}

impl ChatEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: EntryRole::User,
            content: content.into(),
            is_error: false,
            at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: EntryRole::Assistant,
            ..Self::user(content)
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(content)
        }
    }

    /// Entry for a stored message; unknown roles render as the assistant
    pub fn from_message(message: &ChatMessage) -> Self {
        let role = if message.role == "user" {
            EntryRole::User
        } else {
            EntryRole::Assistant
        };
        let at = message
            .created_at
            .as_deref()
            .and_then(crate::format::parse_timestamp)
            .unwrap_or_else(Utc::now);

        Self {
            role,
            content: message.content.clone(),
            is_error: false,
            at,
        }
    }
}

/// Settings form as typed by the user
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub api_url: String,
    pub api_key: String,
    pub model_name: String,
}

/// Page-scoped chat state
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub session_id: Option<SessionId>,
    pub settings: Option<ApiSettings>,
    /// Settings dialog is open because no usable settings exist
    pub configuring: bool,
    pub transcript: Vec<ChatEntry>,
}

pub struct ChatPage<'a, T> {
    client: &'a ApiClient<T>,
    backend: &'a dyn ChatBackend,
    state: ChatState,
}

impl<'a, T: Transport + 'a> ChatPage<'a, T> {
    /// Page backed entirely by the REST client
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self::with_backend(client, client)
    }

    /// Page storing settings, sessions and turns in `backend`
    pub fn with_backend(client: &'a ApiClient<T>, backend: &'a dyn ChatBackend) -> Self {
        Self {
            client,
            backend,
            state: ChatState::default(),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn is_configured(&self) -> bool {
        self.state.settings.is_some()
    }

    /// Load stored settings; without them the page enters configuring mode
    pub async fn init(&mut self) -> bool {
        match self.backend.load_settings().await {
            Ok(Some(settings)) => {
                self.state.settings = Some(settings);
                self.state.configuring = false;
            }
            Ok(None) => self.state.configuring = true,
            Err(e) => {
                tracing::error!(error = %e, "Error checking API config");
                self.state.configuring = true;
            }
        }
        self.is_configured()
    }

    /// Values to pre-fill the settings form with (never the key)
    pub fn settings_form(&self) -> SettingsForm {
        match &self.state.settings {
            Some(s) => SettingsForm {
                api_url: s.api_url.clone(),
                api_key: String::new(),
                model_name: s.model_name.clone(),
            },
            None => SettingsForm::default(),
        }
    }

    pub async fn save_settings(&mut self, form: &SettingsForm) -> Notice {
        let api_url = form.api_url.trim();
        let api_key = form.api_key.trim();
        let model_name = form.model_name.trim();

        if api_url.is_empty() || api_key.is_empty() || model_name.is_empty() {
            return Notice::error("Please fill in all fields");
        }

        match self.backend.save_settings(api_url, api_key, model_name).await {
            Ok(saved) => {
                let settings = saved.unwrap_or_else(|| ApiSettings {
                    api_url: api_url.to_string(),
                    api_key: None,
                    model_name: model_name.to_string(),
                });
                self.state.settings = Some(settings);
                self.state.configuring = false;
                Notice::success("Settings saved!")
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving config");
                Notice::error(format!("Failed to save settings: {}", e))
            }
        }
    }

    /// Send one message
    ///
    /// Conversation output (the user line, the reply or an error line) goes
    /// to the transcript. A notice is returned only when the send could not
    /// start at all.
    pub async fn send(&mut self, message: &str) -> Option<Notice> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        if !self.is_configured() {
            self.state.configuring = true;
            return Some(Notice::error("Please configure the API settings first"));
        }

        let session_id = match self.ensure_session().await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Error creating session");
                return Some(Notice::error(format!("Failed to create session: {}", e)));
            }
        };

        self.state.transcript.push(ChatEntry::user(message));

        let history = self.history(&session_id).await;
        self.record_turn(&session_id, "user", message).await;

        let entry = match self.client.chat().send_message(message, &session_id, &history).await {
            Ok(reply) => {
                self.record_turn(&session_id, "assistant", &reply.message).await;
                ChatEntry::assistant(reply.message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error sending message");
                ChatEntry::error(format!("Sorry, an error occurred: {}", chat_error_message(&e)))
            }
        };
        self.state.transcript.push(entry);

        None
    }

    async fn ensure_session(&mut self) -> BackendResult<SessionId> {
        if let Some(id) = &self.state.session_id {
            return Ok(id.clone());
        }

        let name = format!("Session {}", format_date_time(Utc::now()));
        let session = self.backend.create_session(&name).await?;
        tracing::info!(session_id = %session.id, backend = self.backend.name(), "Created chat session");

        self.state.session_id = Some(session.id.clone());
        Ok(session.id)
    }

    /// Prior turns of the session; a failed fetch degrades to no history
    async fn history(&self, session_id: &SessionId) -> Vec<HistoryEntry> {
        match self.backend.messages(session_id).await {
            Ok(messages) => messages.iter().map(HistoryEntry::from).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Error getting history");
                Vec::new()
            }
        }
    }

    /// A failed write is logged; the conversation goes on
    async fn record_turn(&self, session_id: &SessionId, role: &str, content: &str) {
        if let Err(e) = self.backend.record_turn(session_id, role, content).await {
            tracing::warn!(error = %e, role = %role, "Error saving message");
        }
    }
}

/// User-facing text for a failed chat round trip
pub fn chat_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Timeout => CHAT_TIMEOUT_MESSAGE.to_string(),
        ClientError::Connectivity { .. } => CHAT_UNREACHABLE_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
