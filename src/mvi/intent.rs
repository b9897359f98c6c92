//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent lifecycle events of a query (started, succeeded,
/// failed). They are processed by reducers to produce new snapshots.
pub trait Intent: Send + 'static {}
