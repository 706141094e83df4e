//! # MoodMate
//!
//! Client for a mood-tracking and AI-chat wellness backend.
//!
//! ## Features
//!
//! - **Request client**: per-request deadlines (95 s for chat, 30 s otherwise)
//!   and one normalized error type for every failure
//! - **Typed API**: config, chat sessions, mood, exercises, reports, accounts
//! - **Headless pages**: auth, chat and dashboard controllers with explicit
//!   page state, rendered through a small trait (HTML or terminal)
//! - **Hosted database**: optional alternative storage for settings,
//!   sessions and messages
//!
//! ## Modules
//!
//! - [`client`]: Request client and HTTP transport
//! - [`api`]: One accessor per backend resource
//! - [`pages`]: Page controllers and view-models
//! - [`view`]: Renderers
//! - [`hosted`]: Hosted database client
//! - [`store`]: Persisted token and user
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moodmate::client::{ApiClient, ClientConfig};
//! use moodmate::pages::ChatPage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default());
//!
//!     let mut chat = ChatPage::new(&client);
//!     if chat.init().await {
//!         chat.send("I slept badly again").await;
//!         for entry in &chat.state().transcript {
//!             println!("{}: {}", entry.role.as_str(), entry.content);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod client;
pub mod config;
pub mod format;
pub mod hosted;
pub mod notice;
pub mod pages;
pub mod store;
pub mod view;

// Re-export top-level types for convenience
pub use client::{
    ApiClient, ClientConfig, ClientError, ClientResult, HttpRequest, HttpResponse,
    RequestOptions, ReqwestTransport, Transport, TransportError,
};

pub use backend::{BackendError, BackendResult, ChatBackend};

pub use config::{Config, ConfigError, HostedConfig, LoggingConfig};

pub use hosted::HostedClient;

pub use notice::{Notice, NoticeKind};

pub use pages::{
    AuthPage, ChartView, ChatEntry, ChatPage, DashboardPage, Navigation, ReportPanel, Route,
    SessionsView,
};

pub use store::{LocalStore, StoreError};

pub use view::{HtmlRenderer, Render, TerminalRenderer};
