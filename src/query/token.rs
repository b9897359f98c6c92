use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Marker for one fetch attempt. Tokens from the same source are unique and
/// strictly increasing; only the last one minted is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchToken(u64);

impl fmt::Display for FetchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints tokens and remembers the latest one.
#[derive(Debug, Default)]
pub struct TokenSource {
    last: AtomicU64,
}

impl TokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self) -> FetchToken {
        FetchToken(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        self.last.load(Ordering::SeqCst) == token.0
    }
}
