//! MoodMate REST API
//!
//! One accessor per backend resource. Each operation maps to exactly one HTTP
//! call with a fixed method and path; there is no logic beyond forwarding
//! arguments.
//!
//! # Endpoints
//!
//! ## Config
//! - `GET /config` - Stored AI provider settings
//! - `POST /config` - Save AI provider settings
//!
//! ## Chat
//! - `POST /chat` - Send a message, receive the assistant reply
//! - `POST /sessions` - Create a session
//! - `GET /sessions` - List sessions
//! - `GET /sessions/:id/messages` - Messages of a session
//!
//! ## Mood
//! - `POST /mood/record` - Record a mood entry
//! - `GET /mood/records` - List mood records
//! - `GET /mood/trends?period=` - Averages over a period
//!
//! ## Exercises
//! - `GET /exercises/types` - Available exercise types
//! - `POST /exercises` - Log an exercise
//! - `GET /exercises` - List logged exercises
//!
//! ## Reports
//! - `GET /reports/generate?period=` - Generate a report
//! - `GET /reports` - List stored reports
//!
//! ## Auth
//! - `POST /auth/login`, `POST /auth/register`, `POST /auth/logout`

pub mod auth;
pub mod chat;
pub mod config;
pub mod dto;
pub mod exercise;
pub mod mood;
pub mod report;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use config::ConfigApi;
pub use dto::*;
pub use exercise::ExerciseApi;
pub use mood::MoodApi;
pub use report::ReportApi;

use crate::client::{ApiClient, Transport};

/// Default aggregation window for trend and report queries
pub const DEFAULT_PERIOD: &str = "week";

impl<T: Transport> ApiClient<T> {
    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    pub fn settings(&self) -> ConfigApi<'_, T> {
        ConfigApi::new(self)
    }

    pub fn chat(&self) -> ChatApi<'_, T> {
        ChatApi::new(self)
    }

    pub fn mood(&self) -> MoodApi<'_, T> {
        MoodApi::new(self)
    }

    pub fn exercises(&self) -> ExerciseApi<'_, T> {
        ExerciseApi::new(self)
    }

    pub fn reports(&self) -> ReportApi<'_, T> {
        ReportApi::new(self)
    }
}

/// `?period=<encoded>` query suffix
pub(crate) fn period_query(period: &str) -> String {
    format!("?period={}", urlencoding::encode(period))
}
