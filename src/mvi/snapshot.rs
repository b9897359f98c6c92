//! Base trait for state snapshots.

/// Marker trait for state snapshots.
///
/// Snapshots are replaced wholesale, never patched in place, and compared
/// with `PartialEq` to decide whether observers must be notified.
pub trait Snapshot: Clone + PartialEq + Default + Send + 'static {}
