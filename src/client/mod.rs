//! HTTP capability used by the query coordinator.
//!
//! [`ApiClient`] is object safe so hooks can receive it as `&dyn ApiClient`;
//! the returned future is `'static` so a request can be issued synchronously
//! and awaited on a spawned task.

pub mod error;
mod http;
pub mod pagination;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::query::QueryRequest;

pub use error::ApiError;
pub use http::HttpClient;
pub use pagination::{PageLink, PageLinks};

/// Pending response of a single request.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<ApiResponse, ApiError>> + Send>>;

/// Asynchronous GET capability.
pub trait ApiClient: Send + Sync + 'static {
    /// Start a GET for `request`. Nothing is awaited until the future is polled,
    /// but implementations may register the request immediately.
    fn request(&self, request: &QueryRequest) -> ResponseFuture;

    /// Abandon every request currently in flight. Default: no-op.
    fn clear(&self) {}
}

/// A decoded response: payload, secondary value and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub payload: Value,
    /// Reason phrase of the status line (e.g., "OK").
    pub status_text: Option<String>,
    pub meta: ResponseMeta,
}

impl ApiResponse {
    /// A 200 response with no headers.
    pub fn ok(payload: Value) -> Self {
        Self {
            payload,
            status_text: Some("OK".to_string()),
            meta: ResponseMeta::new(200, Vec::new()),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.meta.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Status and headers of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u16,
    headers: Vec<(String, String)>,
}

impl ResponseMeta {
    pub fn new(status: u16, headers: Vec<(String, String)>) -> Self {
        Self { status, headers }
    }

    /// Case-insensitive header lookup, first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
