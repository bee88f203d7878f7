//! Error types for the relay

use thiserror::Error;

/// Relay error types
#[derive(Error, Debug)]
pub enum AiError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("{provider} API error ({status}): {message}")]
    LlmHttp {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failed completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Authentication,
    Connection,
    RateLimited,
    Api,
    Other,
}

impl AiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AiError::LlmHttp { status, .. } => match *status {
                401 | 403 => FailureKind::Authentication,
                429 => FailureKind::RateLimited,
                _ => FailureKind::Api,
            },
            AiError::Connection(_) => FailureKind::Connection,
            AiError::Http(e) if e.is_connect() || e.is_timeout() => FailureKind::Connection,
            // Untyped errors only carry text; match the provider's wording.
            AiError::Llm(message) if message.to_lowercase().contains("rate limit") => {
                FailureKind::RateLimited
            }
            _ => FailureKind::Other,
        }
    }

    /// Server-provided message for API errors.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            AiError::LlmHttp { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, AiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16) -> AiError {
        AiError::LlmHttp {
            provider: "Test".to_string(),
            status,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(http_error(401).kind(), FailureKind::Authentication);
        assert_eq!(http_error(403).kind(), FailureKind::Authentication);
        assert_eq!(http_error(429).kind(), FailureKind::RateLimited);
        assert_eq!(http_error(500).kind(), FailureKind::Api);
        assert_eq!(http_error(400).kind(), FailureKind::Api);
    }

    #[test]
    fn test_llm_string_fallback() {
        let limited = AiError::Llm("Rate limit reached for requests".to_string());
        let other = AiError::Llm("bad request".to_string());
        assert_eq!(limited.kind(), FailureKind::RateLimited);
        assert_eq!(other.kind(), FailureKind::Other);
    }

    #[test]
    fn test_connection_and_other() {
        assert_eq!(
            AiError::Connection("refused".to_string()).kind(),
            FailureKind::Connection
        );
        assert_eq!(
            AiError::InvalidFormat("empty".to_string()).kind(),
            FailureKind::Other
        );
        assert_eq!(http_error(502).api_message(), Some("boom"));
        assert_eq!(AiError::Llm("x".to_string()).api_message(), None);
    }
}
