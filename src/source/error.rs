//! Fetch failures and their classification.

use serde::Serialize;
use thiserror::Error;

/// Failure of a single fetch attempt.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// No HTTP response was obtained (connect failure, timeout, DNS...).
    #[error("request failed before a response was received: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),

    /// A response arrived but its body could not be decoded.
    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

/// User-facing error classification carried by a refresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NetworkError,
    ServerError,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(_) => ErrorKind::NetworkError,
            FetchError::Status(_) | FetchError::Decode(_) => ErrorKind::ServerError,
        }
    }

    /// Whether a user-initiated re-fetch is offered.
    ///
    /// Every failure path is currently retryable.
    pub fn is_retryable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            FetchError::Network("connection refused".into()).kind(),
            ErrorKind::NetworkError
        );
        assert_eq!(
            FetchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR).kind(),
            ErrorKind::ServerError
        );
        assert_eq!(FetchError::Decode("eof".into()).kind(), ErrorKind::ServerError);
    }

    #[test]
    fn test_all_failures_retryable() {
        assert!(FetchError::Network(String::new()).is_retryable());
        assert!(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY).is_retryable());
        assert!(FetchError::Decode(String::new()).is_retryable());
    }
}
