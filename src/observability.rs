//! Logging setup and mount counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`; defaults to `info`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Counters recorded while the engine mounts an application
#[derive(Debug, Default)]
pub struct MountStats {
    routes_mounted: AtomicU64,
    middleware_applied: AtomicU64,
    init_hooks_run: AtomicU64,
}

impl MountStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route_mounted(&self, middleware: usize) {
        self.routes_mounted.fetch_add(1, Ordering::Relaxed);
        self.middleware_applied
            .fetch_add(middleware as u64, Ordering::Relaxed);
        tracing::debug!(counter = "routes_mounted", "Metric incremented");
    }

    pub fn init_hook_run(&self) {
        self.init_hooks_run.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "init_hooks_run", "Metric incremented");
    }

    pub fn snapshot(&self) -> MountSnapshot {
        MountSnapshot {
            routes_mounted: self.routes_mounted.load(Ordering::Relaxed),
            middleware_applied: self.middleware_applied.load(Ordering::Relaxed),
            init_hooks_run: self.init_hooks_run.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountSnapshot {
    pub routes_mounted: u64,
    pub middleware_applied: u64,
    pub init_hooks_run: u64,
}
