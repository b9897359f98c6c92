//! State/Intent/Reducer primitives.
//!
//! Every change to observable state goes through a reducer:
//!
//! ```text
//! Intent ──→ Reducer ──→ Snapshot ──→ render callback
//!    ↑                                  │
//!    └──────── completions ─────────────┘
//! ```
//!
//! - **Snapshot**: immutable value describing the current state
//! - **Intent**: an event that may change it (fetch started, completed, failed)
//! - **Reducer**: pure function `(Snapshot, Intent) -> Snapshot`

mod intent;
mod reducer;
mod snapshot;

pub use intent::Intent;
pub use reducer::Reducer;
pub use snapshot::Snapshot;
