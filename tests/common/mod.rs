//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use discover_query::client::{ApiClient, ApiError, ApiResponse, ResponseFuture};
use discover_query::query::{QueryProps, QueryRequest, RenderProps};
use discover_query::view::{EventView, TimeRange};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;

pub const BASE_PATH: &str = "/api/0/organizations";

// -- Scripted client ------------------------------------------------------------

struct ScriptedCall {
    request: QueryRequest,
    responder: Option<oneshot::Sender<Result<ApiResponse, ApiError>>>,
}

/// In-process `ApiClient` whose responses are released by the test, in any
/// order, one call at a time.
#[derive(Default)]
pub struct ScriptedClient {
    calls: Mutex<Vec<ScriptedCall>>,
    cleared: AtomicUsize,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear_count(&self) -> usize {
        self.cleared.load(Ordering::SeqCst)
    }

    pub fn request_at(&self, index: usize) -> QueryRequest {
        self.calls.lock()[index].request.clone()
    }

    /// Release call `index`. Ignored if the receiver is gone.
    pub fn respond(&self, index: usize, result: Result<ApiResponse, ApiError>) {
        let responder = self.calls.lock()[index]
            .responder
            .take()
            .expect("call already answered");
        let _ = responder.send(result);
    }

    pub fn succeed(&self, index: usize, payload: Value) {
        self.respond(index, Ok(ApiResponse::ok(payload)));
    }

    pub fn succeed_with_link(&self, index: usize, payload: Value, link: &str) {
        self.respond(index, Ok(ApiResponse::ok(payload).with_header("Link", link)));
    }

    pub fn fail(&self, index: usize, status: u16, body: Option<Value>) {
        self.respond(index, Err(ApiError::Status { status, body }));
    }
}

impl ApiClient for ScriptedClient {
    fn request(&self, request: &QueryRequest) -> ResponseFuture {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().push(ScriptedCall {
            request: request.clone(),
            responder: Some(tx),
        });
        Box::pin(async move { rx.await.unwrap_or(Err(ApiError::Cancelled)) })
    }

    fn clear(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }
}

/// `ApiClient` that answers every request at once with the same payload.
pub struct InstantClient {
    payload: Value,
    calls: AtomicUsize,
}

impl InstantClient {
    pub fn new(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            payload,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ApiClient for InstantClient {
    fn request(&self, _request: &QueryRequest) -> ResponseFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let payload = self.payload.clone();
        Box::pin(async move { Ok(ApiResponse::ok(payload)) })
    }
}

// -- Render recording -------------------------------------------------------------

/// Collects every snapshot passed to the render callback.
#[derive(Clone, Default)]
pub struct RenderLog(Arc<Mutex<Vec<RenderProps<Value>>>>);

impl RenderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorder(&self) -> impl Fn(&RenderProps<Value>) + Send + Sync + 'static {
        let log = self.0.clone();
        move |props| log.lock().push(props.clone())
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn all(&self) -> Vec<RenderProps<Value>> {
        self.0.lock().clone()
    }

    pub fn last(&self) -> Option<RenderProps<Value>> {
        self.0.lock().last().cloned()
    }

    /// Every payload that was ever rendered as data.
    pub fn rendered_data(&self) -> Vec<Value> {
        self.0.lock().iter().filter_map(|p| p.data.clone()).collect()
    }
}

// -- Props helpers ----------------------------------------------------------------

pub fn events_view() -> EventView {
    EventView {
        fields: vec!["title".to_string(), "count()".to_string()],
        query: "event.type:error".to_string(),
        sort: Some("-count".to_string()),
        projects: vec![42],
        time_range: TimeRange::Relative("14d".to_string()),
        ..EventView::default()
    }
}

pub fn events_props() -> QueryProps {
    QueryProps::new(events_view(), "acme", "events")
}

pub fn rows(tag: &str) -> Value {
    json!({ "data": [{ "title": tag, "count()": 1 }], "meta": { "title": "string" } })
}

// -- Config helpers ---------------------------------------------------------------

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
