//! Housekeeping Task
//!
//! Periodically reports cache sizes to a telemetry sink and, when a limit is
//! configured, purges the cache down to it. Cache answers never depend on
//! this task running.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::PreflightCache;

// == Metrics Snapshot ==
/// Sizes observed on one housekeeping tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Origins with at least one entry
    pub origin_count: usize,
    /// Entries across all origins
    pub entry_count: usize,
    /// Entries removed by this tick's purge
    pub purged: usize,
}

// == Reporter ==
/// Receives a snapshot on every housekeeping tick.
pub trait MetricsReporter: Send + Sync {
    fn report(&self, snapshot: &MetricsSnapshot);
}

/// Reporter that emits snapshots as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl MetricsReporter for TracingReporter {
    fn report(&self, snapshot: &MetricsSnapshot) {
        info!(
            origins = snapshot.origin_count,
            entries = snapshot.entry_count,
            purged = snapshot.purged,
            "preflight cache metrics"
        );
    }
}

// == Housekeeping ==
/// Runs one housekeeping pass: purge (if a limit is given), then snapshot.
pub fn run_housekeeping(
    cache: &mut PreflightCache,
    purge_limit: Option<usize>,
) -> MetricsSnapshot {
    let purged = purge_limit.map_or(0, |max_entries| cache.may_purge(max_entries));
    MetricsSnapshot {
        origin_count: cache.origin_count(),
        entry_count: cache.entry_count(),
        purged,
    }
}

/// Spawns the periodic housekeeping task.
///
/// Each tick takes the write lock only for the purge and the size snapshot;
/// the reporter runs after the lock is released.
///
/// # Arguments
/// * `cache` - Shared cache
/// * `interval` - Time between ticks
/// * `reporter` - Telemetry sink for each snapshot
/// * `purge_limit` - Entry limit to enforce on each tick, or None to only report
///
/// # Returns
/// A JoinHandle that can be aborted during shutdown.
pub fn spawn_metrics_task(
    cache: Arc<RwLock<PreflightCache>>,
    interval: Duration,
    reporter: Arc<dyn MetricsReporter>,
    purge_limit: Option<usize>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            ?purge_limit,
            "Starting preflight cache housekeeping task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let snapshot = {
                let mut cache_guard = cache.write().await;
                run_housekeeping(&mut cache_guard, purge_limit)
            };

            if snapshot.purged > 0 {
                debug!(purged = snapshot.purged, "housekeeping purged entries");
            }
            reporter.report(&snapshot);
        }
    })
}
