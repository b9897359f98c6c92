use std::sync::Arc;

use serde_json::Value;

use crate::client::ApiClient;
use crate::query::request::QueryProps;
use crate::view::QueryParams;

pub type BeforeFetch = Arc<dyn Fn(&dyn ApiClient) + Send + Sync>;
pub type AfterFetch<T> = Arc<dyn Fn(Value, &QueryProps) -> T + Send + Sync>;
pub type DidFetch<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub type RequestPayload = Arc<dyn Fn(&QueryProps) -> QueryParams + Send + Sync>;
pub type RefetchPredicate = Arc<dyn Fn(&QueryProps, &QueryProps) -> bool + Send + Sync>;
pub type ErrorReporter = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// Optional strategy callbacks injected into a coordinator.
pub struct QueryHooks<T> {
    /// Runs right before the request is issued, e.g. to `clear()` the client.
    pub before_fetch: Option<BeforeFetch>,
    /// Turns the raw payload into `T`. Without it the payload is deserialised.
    pub after_fetch: Option<AfterFetch<T>>,
    /// Notified with the transformed payload before it is committed.
    pub did_fetch: Option<DidFetch<T>>,
    /// Replaces the view-derived base parameters.
    pub get_request_payload: Option<RequestPayload>,
    /// Extra refetch condition.
    pub should_refetch_data: Option<RefetchPredicate>,
    /// `None` when a fetch starts, `Some(message)` when one fails.
    pub set_error: Option<ErrorReporter>,
}

impl<T> QueryHooks<T> {
    pub fn new() -> Self {
        Self {
            before_fetch: None,
            after_fetch: None,
            did_fetch: None,
            get_request_payload: None,
            should_refetch_data: None,
            set_error: None,
        }
    }

    pub fn before_fetch(mut self, f: impl Fn(&dyn ApiClient) + Send + Sync + 'static) -> Self {
        self.before_fetch = Some(Arc::new(f));
        self
    }

    pub fn after_fetch(mut self, f: impl Fn(Value, &QueryProps) -> T + Send + Sync + 'static) -> Self {
        self.after_fetch = Some(Arc::new(f));
        self
    }

    pub fn did_fetch(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.did_fetch = Some(Arc::new(f));
        self
    }

    pub fn get_request_payload(
        mut self,
        f: impl Fn(&QueryProps) -> QueryParams + Send + Sync + 'static,
    ) -> Self {
        self.get_request_payload = Some(Arc::new(f));
        self
    }

    pub fn should_refetch_data(
        mut self,
        f: impl Fn(&QueryProps, &QueryProps) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_refetch_data = Some(Arc::new(f));
        self
    }

    pub fn set_error(mut self, f: impl Fn(Option<&str>) + Send + Sync + 'static) -> Self {
        self.set_error = Some(Arc::new(f));
        self
    }
}

impl<T> Default for QueryHooks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for QueryHooks<T> {
    fn clone(&self) -> Self {
        Self {
            before_fetch: self.before_fetch.clone(),
            after_fetch: self.after_fetch.clone(),
            did_fetch: self.did_fetch.clone(),
            get_request_payload: self.get_request_payload.clone(),
            should_refetch_data: self.should_refetch_data.clone(),
            set_error: self.set_error.clone(),
        }
    }
}

/// Base parameters before caller overrides are merged in.
pub(crate) fn base_params<T>(props: &QueryProps, hooks: &QueryHooks<T>) -> QueryParams {
    match &hooks.get_request_payload {
        Some(payload) => payload(props),
        None => props.view.query_params(&props.location),
    }
}
