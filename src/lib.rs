//! Query fetch coordination for an events API.
//!
//! A [`query::QueryCoordinator`] derives a GET request from a view state,
//! issues it, drops successful responses that a newer fetch has superseded,
//! and hands `{is_loading, error, data, page_info}` snapshots to a render
//! callback.

pub mod client;
pub mod config;
pub mod lifecycle;
pub mod logging;
pub mod mvi;
pub mod query;
pub mod view;
