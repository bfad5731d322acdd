//! Tracing setup and in-process counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

use crate::handlers::TaskKind;

/// Install the global `fmt` subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests); keep the first one
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[derive(Debug, Default)]
struct TaskCounters {
    website_analysis: AtomicU64,
    music_search: AtomicU64,
    image_generation: AtomicU64,
}

impl TaskCounters {
    fn incr(&self, kind: TaskKind) {
        let counter = match kind {
            TaskKind::WebsiteAnalysis => &self.website_analysis,
            TaskKind::MusicSearch => &self.music_search,
            TaskKind::ImageGeneration => &self.image_generation,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> TaskCounts {
        TaskCounts {
            website_analysis: self.website_analysis.load(Ordering::Relaxed),
            music_search: self.music_search.load(Ordering::Relaxed),
            image_generation: self.image_generation.load(Ordering::Relaxed),
        }
    }
}

/// Metrics handle shared by all requests
#[derive(Debug, Default)]
pub struct Metrics {
    succeeded: TaskCounters,
    failed: TaskCounters,
    dispatched: TaskCounters,
    dispatch_rejected: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_succeeded(&self, kind: TaskKind) {
        self.succeeded.incr(kind);
        tracing::debug!(counter = "tasks_succeeded", task = kind.tag(), "Metric incremented");
    }

    pub fn task_failed(&self, kind: TaskKind) {
        self.failed.incr(kind);
        tracing::debug!(counter = "tasks_failed", task = kind.tag(), "Metric incremented");
    }

    /// A legacy `/agent-task` payload was routed to `kind`
    pub fn legacy_dispatched(&self, kind: TaskKind) {
        self.dispatched.incr(kind);
        tracing::debug!(counter = "legacy_dispatched", task = kind.tag(), "Metric incremented");
    }

    /// A legacy payload matched no rule
    pub fn legacy_rejected(&self) {
        self.dispatch_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "legacy_rejected", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tasks_succeeded: self.succeeded.snapshot(),
            tasks_failed: self.failed.snapshot(),
            legacy_dispatched: self.dispatched.snapshot(),
            legacy_rejected: self.dispatch_rejected.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub website_analysis: u64,
    pub music_search: u64,
    pub image_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub tasks_succeeded: TaskCounts,
    pub tasks_failed: TaskCounts,
    pub legacy_dispatched: TaskCounts,
    pub legacy_rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_per_task() {
        let metrics = Metrics::new();
        metrics.task_succeeded(TaskKind::MusicSearch);
        metrics.task_succeeded(TaskKind::MusicSearch);
        metrics.task_failed(TaskKind::ImageGeneration);
        metrics.legacy_dispatched(TaskKind::WebsiteAnalysis);
        metrics.legacy_rejected();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.tasks_succeeded.music_search, 2);
        assert_eq!(snapshot.tasks_succeeded.website_analysis, 0);
        assert_eq!(snapshot.tasks_failed.image_generation, 1);
        assert_eq!(snapshot.legacy_dispatched.website_analysis, 1);
        assert_eq!(snapshot.legacy_rejected, 1);
    }

    #[test]
    fn test_snapshot_serializes_flat_names() {
        let value = serde_json::to_value(Metrics::new().snapshot()).unwrap();
        assert_eq!(value["tasks_failed"]["website_analysis"], 0);
        assert_eq!(value["legacy_rejected"], 0);
    }
}
