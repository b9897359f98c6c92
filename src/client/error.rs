//! Error taxonomy of the API client.

use serde_json::Value;
use thiserror::Error;

/// Errors a request can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure before a complete response arrived.
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Server answered with a non-success status.
    #[error("Request failed with status {status}")]
    Status { status: u16, body: Option<Value> },

    /// Success status but the body was not JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Abandoned by [`ApiClient::clear`](super::ApiClient::clear).
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Parsed JSON body of an error response, if any.
    pub fn response_json(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Human-readable message from the response body.
    ///
    /// Accepts `{"detail": "..."}` and `{"detail": {"message": "..."}}`.
    pub fn detail(&self) -> Option<String> {
        let detail = self.response_json()?.get("detail")?;
        match detail {
            Value::String(message) => Some(message.clone()),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    /// Short machine-readable tag for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Build(_) => "build_error",
            ApiError::InvalidUrl(_) => "invalid_url",
            ApiError::Connection { .. } => "connection_error",
            ApiError::Timeout { .. } => "request_timeout",
            ApiError::Status { .. } => "status_error",
            ApiError::Decode(_) => "decode_error",
            ApiError::Cancelled => "cancelled",
        }
    }
}
