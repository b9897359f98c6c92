use crate::mvi::Intent;
use crate::query::state::Payload;
use crate::query::token::FetchToken;

/// Lifecycle events of a fetch.
#[derive(Debug, Clone)]
pub enum FetchIntent<T> {
    Started {
        token: FetchToken,
    },
    Succeeded {
        token: FetchToken,
        payload: T,
        page_info: Option<String>,
    },
    /// Not token-gated: a failure always becomes visible.
    Failed {
        message: String,
    },
}

impl<T: Payload> Intent for FetchIntent<T> {}
