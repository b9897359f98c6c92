use crate::mvi::Snapshot;
use crate::query::token::FetchToken;

/// Bound for values a query can hold.
pub trait Payload: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> Payload for T {}

/// Visible outcome of the current query.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    /// Nothing fetched yet.
    Idle,
    Loading,
    Success {
        payload: T,
        /// `Link` header of the response, or the last known one.
        page_info: Option<String>,
    },
    Error {
        message: String,
    },
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        FetchResult::Idle
    }
}

/// Snapshot owned by a coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub result: FetchResult<T>,
    /// Token of the latest started fetch.
    pub token: Option<FetchToken>,
    /// Last pagination header seen; survives loading and error states.
    pub page_info: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            result: FetchResult::Idle,
            token: None,
            page_info: None,
        }
    }
}

impl<T: Payload> Snapshot for QueryState<T> {}

impl<T: Payload> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self.result, FetchResult::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.result {
            FetchResult::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match &self.result {
            FetchResult::Success { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn render_props(&self) -> RenderProps<T> {
        RenderProps {
            is_loading: self.is_loading(),
            error: self.error().map(str::to_string),
            data: self.data().cloned(),
            page_info: self.page_info.clone(),
        }
    }
}

/// What the render callback receives.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProps<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
    pub page_info: Option<String>,
}
