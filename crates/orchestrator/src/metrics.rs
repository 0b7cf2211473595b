use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Atomic counters tracking publish attempts.
///
/// All counters use relaxed ordering. For a consistent point-in-time view,
/// call [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct OrchestratorMetrics {
    /// Publish attempts that reached a publisher or failed before it.
    pub attempted: AtomicU64,
    /// Attempts the platform accepted.
    pub published: AtomicU64,
    /// Attempts that ended in a failed receipt.
    pub failed: AtomicU64,
    /// Requests for a platform without a publisher.
    pub unsupported: AtomicU64,
    /// Staged media removed after an attempt.
    pub cleaned_up: AtomicU64,
}

impl OrchestratorMetrics {
    pub fn increment_attempted(&self) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_unsupported(&self) {
        self.unsupported.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cleaned_up(&self) {
        self.cleaned_up.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            attempted: self.attempted.load(Ordering::Relaxed),
            published: self.published.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            unsupported: self.unsupported.load(Ordering::Relaxed),
            cleaned_up: self.cleaned_up.load(Ordering::Relaxed),
        }
    }
}

/// A plain-data snapshot of [`OrchestratorMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub attempted: u64,
    pub published: u64,
    pub failed: u64,
    pub unsupported: u64,
    pub cleaned_up: u64,
}
