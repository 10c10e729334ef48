//! Refresh driver — runs pipeline passes on a timer and installs snapshots.
//!
//! Timer-based loop:
//! 1. Tick fires (immediately on startup, then every interval)
//! 2. `Refresher::refresh_now()` runs one fetch-classify-merge pass
//! 3. The merged list replaces the snapshot in `InboxState`
//!
//! Overlapping refresh requests do not stack: whichever arrives while a
//! pass is in flight is dropped, not queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::ingest::pipeline::IngestPipeline;
use crate::state::InboxState;

/// Outcome of a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A pass ran to completion; the snapshot now holds `total` emails.
    Completed { total: usize },
    /// A pass was already in flight; this request was dropped.
    AlreadyRunning,
}

/// Couples the pipeline to the snapshot state, one pass in flight at most.
pub struct Refresher {
    pipeline: IngestPipeline,
    state: Arc<InboxState>,
    batch_size: usize,
    in_flight: Mutex<()>,
}

impl Refresher {
    /// Create a new refresher.
    pub fn new(pipeline: IngestPipeline, state: Arc<InboxState>, batch_size: usize) -> Self {
        Self {
            pipeline,
            state,
            batch_size,
            in_flight: Mutex::new(()),
        }
    }

    /// Run one refresh pass now, unless one is already running.
    ///
    /// A failed fetch still installs an (empty) snapshot and advances the
    /// cycle counter, so callers always observe the most recent attempt.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("Refresh already in flight; dropping request");
            return RefreshOutcome::AlreadyRunning;
        };

        let emails = self.pipeline.refresh(self.batch_size).await;
        let total = emails.len();
        let cycle = self.state.replace(emails).await;

        info!(cycle, total, "Inbox snapshot installed");
        RefreshOutcome::Completed { total }
    }
}

/// Spawn the periodic refresh task.
///
/// Returns a `JoinHandle` and shutdown flag. Setting the flag stops the
/// task at its next tick.
pub fn spawn_refresh_task(
    refresher: Arc<Refresher>,
    interval: Duration,
) -> (JoinHandle<()>, Arc<AtomicBool>) {
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = Arc::clone(&shutdown);

    let handle = tokio::spawn(async move {
        info!("Refresh task started — refreshing every {}s", interval.as_secs());

        let mut tick = tokio::time::interval(interval);

        // Run immediately on first tick
        loop {
            tick.tick().await;

            if shutdown.load(Ordering::Relaxed) {
                info!("Refresh task shutting down");
                return;
            }

            if refresher.refresh_now().await == RefreshOutcome::AlreadyRunning {
                warn!("Previous refresh pass still running; tick skipped");
            }
        }
    });

    (handle, shutdown_flag)
}
