//! The query fetch coordinator and its building blocks.

mod coordinator;
mod hooks;
mod intent;
mod reducer;
mod refetch;
mod request;
mod state;
mod token;

pub use coordinator::{QueryCoordinator, RenderFn, UNKNOWN_ERROR};
pub use hooks::{
    AfterFetch, BeforeFetch, DidFetch, ErrorReporter, QueryHooks, RefetchPredicate, RequestPayload,
};
pub use intent::FetchIntent;
pub use reducer::FetchReducer;
pub use refetch::should_refetch;
pub use request::{QueryProps, QueryRequest};
pub use state::{FetchResult, Payload, QueryState, RenderProps};
pub use token::{FetchToken, TokenSource};
