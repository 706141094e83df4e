//! Page Controllers
//!
//! Each page owns its state explicitly and returns view-models or notices
//! instead of touching a document. Rendering happens in [`crate::view`].

pub mod auth;
pub mod chat;
pub mod dashboard;

pub use auth::{validate_registration, AuthPage, RegisterForm};
pub use chat::{ChatEntry, ChatPage, ChatState, EntryRole, SettingsForm};
pub use dashboard::{ChartView, DashboardPage, ReportPanel, ReportView, SessionSummary, SessionsView};

use std::time::Duration;

/// Pages a handler can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Login,
    Dashboard,
    Chat,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Index => "index.html",
            Route::Login => "login.html",
            Route::Dashboard => "dashboard.html",
            Route::Chat => "chat.html",
        }
    }
}

/// A requested navigation, optionally after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub delay: Duration,
}

impl Navigation {
    pub fn now(route: Route) -> Self {
        Self {
            route,
            delay: Duration::ZERO,
        }
    }

    pub fn after(route: Route, delay: Duration) -> Self {
        Self { route, delay }
    }
}
