use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Last observed reachability of a remote endpoint.
///
/// Starts offline. Each request attempt overwrites the flag; concurrent
/// attempts race and the last writer wins. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct Connectivity {
    online: Arc<AtomicBool>,
}

impl Connectivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Record the outcome of a request attempt.
    pub fn record(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }

    pub fn mark_online(&self) {
        self.record(true);
    }

    pub fn mark_offline(&self) {
        self.record(false);
    }
}
