use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::client::{ApiClient, ApiError, ApiResponse, ResponseFuture};
use crate::lifecycle::Lifecycle;
use crate::mvi::Reducer;
use crate::query::hooks::{base_params, QueryHooks};
use crate::query::intent::FetchIntent;
use crate::query::reducer::FetchReducer;
use crate::query::refetch::should_refetch;
use crate::query::request::{QueryProps, QueryRequest};
use crate::query::state::{Payload, QueryState, RenderProps};
use crate::query::token::{FetchToken, TokenSource};

/// Message shown when a failure carries no detail.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

pub type RenderFn<T> = Arc<dyn Fn(&RenderProps<T>) + Send + Sync>;

/// Owns one logical "current query".
///
/// Every `fetch()` mints a token; a successful response only commits if its
/// token is still the latest. Failures always commit. After `dispose()` no
/// commit, render or hook call happens.
pub struct QueryCoordinator<T: Payload> {
    inner: Arc<CoordinatorInner<T>>,
}

impl<T: Payload> Clone for QueryCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct CoordinatorInner<T: Payload> {
    id: Uuid,
    client: Arc<dyn ApiClient>,
    base_path: String,
    hooks: QueryHooks<T>,
    render: Option<RenderFn<T>>,
    props: Mutex<Option<QueryProps>>,
    state: Mutex<QueryState<T>>,
    /// Serialises commit + render against dispose. Reentrant so a render
    /// callback may call back into the coordinator.
    commit_gate: ReentrantMutex<()>,
    tokens: TokenSource,
    lifecycle: Lifecycle,
}

impl<T: Payload + DeserializeOwned> QueryCoordinator<T> {
    pub fn new(client: Arc<dyn ApiClient>, base_path: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                id: Uuid::new_v4(),
                client,
                base_path: base_path.into(),
                hooks: QueryHooks::new(),
                render: None,
                props: Mutex::new(None),
                state: Mutex::new(QueryState::default()),
                commit_gate: ReentrantMutex::new(()),
                tokens: TokenSource::new(),
                lifecycle: Lifecycle::new(),
            }),
        }
    }

    /// Install hooks. Only effective before the coordinator is cloned.
    pub fn with_hooks(mut self, hooks: QueryHooks<T>) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.hooks = hooks;
        }
        self
    }

    /// Install the render callback. Only effective before the coordinator
    /// is cloned.
    pub fn on_render(mut self, render: impl Fn(&RenderProps<T>) + Send + Sync + 'static) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.render = Some(Arc::new(render));
        }
        self
    }

    /// Store the inputs for the next fetch. No I/O.
    pub fn configure(&self, props: QueryProps) {
        *self.inner.props.lock() = Some(props);
    }

    /// Configure and fetch, as on first mount.
    pub fn mount(&self, props: QueryProps) -> Option<JoinHandle<()>> {
        self.configure(props);
        self.fetch()
    }

    /// Replace the inputs and fetch when [`should_refetch`] says so.
    pub fn update(&self, props: QueryProps) -> Option<JoinHandle<()>> {
        let previous = self.inner.props.lock().replace(props.clone());
        let refetch = match previous {
            Some(previous) => should_refetch(&previous, &props, &self.inner.hooks),
            None => true,
        };
        if refetch {
            self.fetch()
        } else {
            tracing::debug!(coordinator = %self.inner.id, "Inputs unchanged, keeping current result");
            None
        }
    }

    /// Start a fetch for the configured inputs.
    ///
    /// Returns `None` without touching state when the coordinator is
    /// disposed, unconfigured, or its view is invalid. Otherwise the request
    /// is issued before returning and completes on the returned task.
    pub fn fetch(&self) -> Option<JoinHandle<()>> {
        let inner = &self.inner;
        if inner.lifecycle.is_disposed() {
            tracing::debug!(coordinator = %inner.id, "Fetch after dispose ignored");
            return None;
        }

        let Some(props) = inner.props.lock().clone() else {
            tracing::debug!(coordinator = %inner.id, "Fetch before configure ignored");
            return None;
        };
        if !props.view.is_valid() {
            tracing::debug!(coordinator = %inner.id, "Invalid view, skipping fetch");
            return None;
        }

        let token = {
            // Mint and record under the gate so the token in state always
            // matches the newest minted one, whatever thread calls.
            let _gate = inner.commit_gate.lock();
            if inner.lifecycle.is_disposed() {
                return None;
            }
            let token = inner.tokens.mint();
            self.commit(FetchIntent::Started { token });
            token
        };

        if let Some(set_error) = &inner.hooks.set_error {
            set_error(None);
        }

        let request = QueryRequest::build(&inner.base_path, &props, base_params(&props, &inner.hooks));

        if let Some(before_fetch) = &inner.hooks.before_fetch {
            before_fetch(inner.client.as_ref());
        }

        tracing::info!(
            coordinator = %inner.id,
            token = %token,
            path = %request.path,
            cursor = request.params.get("cursor").unwrap_or("-"),
            "Fetching"
        );

        let pending = inner.client.request(&request);
        let this = self.clone();
        Some(tokio::spawn(async move {
            this.complete(token, props, pending).await;
        }))
    }

    /// Stop all future state changes. In-flight tasks finish without effect.
    pub fn dispose(&self) {
        let _gate = self.inner.commit_gate.lock();
        if self.inner.lifecycle.dispose() {
            tracing::debug!(coordinator = %self.inner.id, "Disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lifecycle.is_disposed()
    }

    pub fn state(&self) -> QueryState<T> {
        self.inner.state.lock().clone()
    }

    pub fn render_props(&self) -> RenderProps<T> {
        self.inner.state.lock().render_props()
    }

    async fn complete(&self, token: FetchToken, props: QueryProps, pending: ResponseFuture) {
        let lifecycle = self.inner.lifecycle.clone();
        let outcome = tokio::select! {
            outcome = pending => outcome,
            _ = lifecycle.wait() => {
                tracing::debug!(coordinator = %self.inner.id, token = %token, "Dropped in-flight request on dispose");
                return;
            }
        };

        self.settle(token, &props, outcome);
    }

    /// Apply a finished request. Holds the commit gate so hooks never run
    /// after `dispose()` returns.
    fn settle(&self, token: FetchToken, props: &QueryProps, outcome: Result<ApiResponse, ApiError>) {
        let _gate = self.inner.commit_gate.lock();
        if self.inner.lifecycle.is_disposed() {
            return;
        }

        match outcome {
            Ok(response) => self.on_success(token, props, response),
            Err(ApiError::Cancelled) => {
                tracing::debug!(coordinator = %self.inner.id, token = %token, "Request cancelled by client");
            }
            Err(err) => {
                tracing::warn!(
                    coordinator = %self.inner.id,
                    token = %token,
                    error_type = err.error_type(),
                    error = %err,
                    "Fetch failed"
                );
                self.report_failure(err.detail().unwrap_or_else(|| UNKNOWN_ERROR.to_string()));
            }
        }
    }

    fn on_success(&self, token: FetchToken, props: &QueryProps, response: ApiResponse) {
        let inner = &self.inner;
        if !inner.tokens.is_current(token) {
            tracing::debug!(coordinator = %inner.id, token = %token, "Discarding stale result");
            return;
        }

        let page_info = response.meta.header("Link").map(str::to_string);
        let payload = match &inner.hooks.after_fetch {
            Some(after_fetch) => after_fetch(response.payload, props),
            None => match serde_json::from_value::<T>(response.payload) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(coordinator = %inner.id, token = %token, error = %e, "Unexpected response shape");
                    self.report_failure(format!("Failed to parse response: {}", e));
                    return;
                }
            },
        };

        if let Some(did_fetch) = &inner.hooks.did_fetch {
            did_fetch(&payload);
        }

        if self.commit(FetchIntent::Succeeded {
            token,
            payload,
            page_info,
        }) {
            tracing::info!(
                coordinator = %inner.id,
                token = %token,
                status = response.meta.status,
                status_text = response.status_text.as_deref().unwrap_or(""),
                "Fetch committed"
            );
        }
    }

    fn report_failure(&self, message: String) {
        self.commit(FetchIntent::Failed {
            message: message.clone(),
        });
        if let Some(set_error) = &self.inner.hooks.set_error {
            set_error(Some(&message));
        }
    }

    /// Apply `intent` through the reducer and render if the snapshot changed.
    /// Returns whether anything changed.
    fn commit(&self, intent: FetchIntent<T>) -> bool {
        let _gate = self.inner.commit_gate.lock();
        if self.inner.lifecycle.is_disposed() {
            return false;
        }

        let props = {
            let mut state = self.inner.state.lock();
            let next = FetchReducer::<T>::reduce(state.clone(), intent);
            if next == *state {
                return false;
            }
            *state = next;
            state.render_props()
        };

        if let Some(render) = &self.inner.render {
            render(&props);
        }
        true
    }
}
