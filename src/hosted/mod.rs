//! Hosted Database Backend
//!
//! Direct CRUD against a hosted Postgres REST gateway (PostgREST-style
//! `/rest/v1/<table>` endpoints) for the tables:
//!
//! - `api_config` - AI provider settings (one row)
//! - `chat_sessions` - sessions
//! - `chat_messages` - messages, keyed by `session_id`
//!
//! An alternative to the REST backend for everything except the AI round
//! trip; see [`crate::backend::ChatBackend`].

mod client;

pub use client::{ApiConfigRow, HostedClient};

/// Maximum number of sessions returned by a listing
pub const SESSION_LIST_LIMIT: usize = 50;
