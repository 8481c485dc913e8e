//! Error types for the Keyset client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Error response from the server.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// `kind` field of the error body, when present
        kind: Option<String>,
        message: String,
    },

    /// Local reorder state rejected the operation.
    #[error(transparent)]
    Engine(#[from] keyset_engine::Error),

    /// The task settling a reorder panicked or was cancelled.
    #[error("Reorder task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Whether the request never produced a server response.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout(_) | Self::ConnectionRefused(_)
        )
    }

    /// Short description of the cause, suitable for a failure notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout(_) => "The server did not respond in time".to_string(),
            Self::ConnectionRefused(_) => "Could not reach the server".to_string(),
            Self::Transport(err) => format!("Network error: {err}"),
            Self::Api { message, .. } => message.clone(),
            Self::Engine(err) => err.to_string(),
            Self::Task(_) => "The reorder could not be completed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_not_found() {
        let err = ClientError::Api {
            status: 404,
            kind: Some("notFound".to_string()),
            message: "One or more hotkey sets not found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_network());
        assert_eq!(err.user_message(), "One or more hotkey sets not found");
    }

    #[test]
    fn network_errors_have_distinct_messages() {
        let timeout = ClientError::Timeout(Duration::from_secs(1));
        let refused = ClientError::ConnectionRefused("http://localhost:5000".to_string());

        assert!(timeout.is_network());
        assert!(refused.is_network());
        assert_ne!(timeout.user_message(), refused.user_message());
    }

    #[test]
    fn engine_error_is_transparent() {
        let err = ClientError::from(keyset_engine::Error::ReorderInFlight);
        assert_eq!(err.to_string(), keyset_engine::Error::ReorderInFlight.to_string());
    }
}
