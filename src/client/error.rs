//! Client error types
//!
//! Every failure of a backend call collapses into one [`ClientError`] whose
//! `Display` is the message shown to the user.

use thiserror::Error;

/// Message used when an error body is JSON but names no error
pub const GENERIC_FAILURE: &str = "Request failed";

/// Errors returned by the request client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The per-request deadline elapsed before the exchange completed
    #[error("Request timed out, please try again later")]
    Timeout,

    /// The transport could not reach the backend at all
    #[error("Cannot connect to the server. Make sure the backend is running at {base_url}")]
    Connectivity { base_url: String },

    /// The backend answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Anything else: bad request construction, undecodable body, ...
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ClientError {
    /// HTTP status of an application error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout)
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connectivity { .. })
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_backend_message_verbatim() {
        let err = ClientError::Api {
            status: 400,
            message: "mood_score is required".to_string(),
        };
        assert_eq!(err.to_string(), "mood_score is required");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_connectivity_names_backend() {
        let err = ClientError::Connectivity {
            base_url: "http://localhost:3000/api".to_string(),
        };
        assert!(err.to_string().contains("http://localhost:3000/api"));
        assert!(err.is_connectivity());
        assert!(!err.is_timeout());
        assert_eq!(err.status(), None);
    }
}
