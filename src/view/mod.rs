//! View state: the filters, time range and sort that drive a query.

mod event_view;
mod location;
mod params;

pub use event_view::{EventView, TimeRange};
pub use location::Location;
pub use params::{QueryParams, UNORDERED_KEYS, VOLATILE_KEYS};

/// Capability the coordinator needs from a view-state object.
pub trait ViewState: Send + Sync + 'static {
    /// Whether the view describes a query that can be sent.
    fn is_valid(&self) -> bool;

    /// Derive request parameters, letting the location override parts of
    /// the view (time range, cursor).
    fn query_params(&self, location: &Location) -> QueryParams;

    /// Structural comparison of two derived parameter sets.
    ///
    /// Volatile keys are ignored and multi-valued selection keys are
    /// compared as sets.
    fn is_similar(&self, current: &QueryParams, other: &QueryParams) -> bool {
        current.is_similar(other)
    }
}
