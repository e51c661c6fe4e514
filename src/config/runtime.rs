//! Hot-swappable configuration snapshot.
//!
//! # Design Decisions
//! - `ArcSwap` over a lock: readers take a cheap snapshot per request and
//!   never block the reload path
//! - Handlers read `commandes-last` (and circuit tuning) from the snapshot
//!   each time, so a reload is visible on the very next request

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::AppConfig;

/// Shared handle to the current configuration snapshot.
#[derive(Clone, Debug)]
pub struct SharedConfig {
    inner: Arc<ArcSwap<AppConfig>>,
}

impl SharedConfig {
    /// Wrap an initial configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Current snapshot. Cheap; safe to call per request.
    pub fn snapshot(&self) -> Arc<AppConfig> {
        self.inner.load_full()
    }

    /// Atomically replace the running configuration.
    pub fn replace(&self, config: AppConfig) {
        self.inner.store(Arc::new(config));
    }
}
