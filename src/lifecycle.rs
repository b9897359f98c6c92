//! Disposal signalling shared between a coordinator and its in-flight tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cheap, cloneable disposal flag with async notification.
#[derive(Clone, Default)]
pub struct Lifecycle {
    disposed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as disposed. Returns `true` only for the call that flipped it.
    pub fn dispose(&self) -> bool {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Resolves once `dispose` has been called (immediately if it already was).
    pub async fn wait(&self) {
        // Register interest before reading the flag; a dispose() landing in
        // between would otherwise notify nobody.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_disposed() {
            return;
        }
        notified.await;
    }
}
