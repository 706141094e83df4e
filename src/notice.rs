//! Transient user-facing messages
//!
//! A notice is shown near the form that triggered it and disappears after
//! its lifetime: three seconds for success and info, five for errors.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// How long the notice stays visible
    pub fn lifetime(&self) -> Duration {
        match self.kind {
            NoticeKind::Error => Duration::from_millis(5000),
            NoticeKind::Success | NoticeKind::Info => Duration::from_millis(3000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetimes() {
        assert_eq!(Notice::success("saved").lifetime(), Duration::from_secs(3));
        assert_eq!(Notice::error("failed").lifetime(), Duration::from_secs(5));
        assert!(Notice::error("failed").is_error());
        assert!(!Notice::info("hi").is_error());
    }
}
