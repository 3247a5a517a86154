//! Error types for backend communication

use serde_json::Value;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while talking to the SLMS backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request did not complete within the configured timeout
    #[error("Request timeout - please try again")]
    Timeout,

    /// The server could not be reached
    #[error("Network error - please check your connection")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// Any other transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Session file could not be read or written
    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status for [`ClientError::Status`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error details sent by the server, if any
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Status { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Build the status error for a failed response
    ///
    /// The message is taken from the body's `error` or `detail` field and the
    /// details from its `details` field, falling back to the whole body. A
    /// body that is not JSON falls back to the status reason.
    pub fn from_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        const FALLBACK: &str = "An error occurred";

        let (message, details) = match serde_json::from_str::<Value>(body) {
            Ok(data) => {
                let message = ["error", "detail"]
                    .iter()
                    .find_map(|key| data.get(*key).and_then(non_empty_text))
                    .unwrap_or_else(|| FALLBACK.to_string());
                let details = match data.get("details") {
                    Some(details) if !details.is_null() => details.clone(),
                    _ => data,
                };
                (message, Some(details))
            }
            Err(_) => (
                reason
                    .filter(|r| !r.is_empty())
                    .unwrap_or(FALLBACK)
                    .to_string(),
                None,
            ),
        };

        Self::Status {
            status,
            message,
            details,
        }
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        other => Some(other.to_string()),
    }
}
