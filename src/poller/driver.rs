//! Periodic status polling.
//!
//! # Responsibilities
//! - Run fetch → reconcile once immediately, then every interval
//! - Publish a fresh board view after each successful pass
//! - Skip the pass on fetch failure, keeping the last known board
//! - Stop cleanly on the shutdown signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

use crate::board::{ReconcileOutcome, Reconciler, SharedBoard};
use crate::config::RefreshConfig;
use crate::fetch::SnapshotSource;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Owns the reconciler and drives it from a snapshot source.
pub struct StatusPoller<S> {
    source: S,
    reconciler: Reconciler,
    board: SharedBoard,
    interval: Duration,
}

impl<S> StatusPoller<S>
where
    S: SnapshotSource + 'static,
{
    pub fn new(source: S, reconciler: Reconciler, board: SharedBoard, config: &RefreshConfig) -> Self {
        Self {
            source,
            reconciler,
            board,
            interval: Duration::from_millis(config.interval_ms.max(1)),
        }
    }

    /// Poll until `shutdown` fires, then hand back the reconciler.
    ///
    /// Passes never overlap: a slow fetch delays the next tick instead of
    /// racing it. A shutdown during a fetch abandons that pass.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> Reconciler {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            "Status poller starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Only the fetch awaits, so abandoning a pass leaves the board untouched.
                    tokio::select! {
                        _ = self.poll_once() => {}
                        _ = shutdown.recv() => {
                            tracing::info!("Status poller received shutdown signal mid-fetch, abandoning pass");
                            break;
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Status poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        self.reconciler
    }

    /// One fetch → reconcile pass. `None` when the fetch failed.
    pub async fn poll_once(&mut self) -> Option<ReconcileOutcome> {
        let started = Instant::now();
        let snapshot = match self.source.fetch().await {
            Ok(snapshot) => {
                metrics::record_fetch(true, started);
                snapshot
            }
            Err(e) => {
                metrics::record_fetch(false, started);
                tracing::warn!(
                    error = %e,
                    entries = self.reconciler.len(),
                    "Status fetch failed, keeping last known board"
                );
                return None;
            }
        };

        let outcome = self.reconciler.reconcile(&snapshot);
        metrics::record_actions(outcome.creates.len(), outcome.updates.len());
        metrics::record_board(&outcome.counts, self.reconciler.len());

        self.board.store(Arc::new(self.reconciler.view()));
        Some(outcome)
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Spawn the poller on its own task with a private shutdown handle.
    pub fn spawn(self) -> PollerHandle {
        let shutdown = Shutdown::new();
        let receiver = shutdown.subscribe();
        let task = tokio::spawn(self.run(receiver));
        PollerHandle { shutdown, task }
    }
}

/// Cancellation handle for a spawned poller.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: Shutdown,
    task: JoinHandle<Reconciler>,
}

impl PollerHandle {
    /// Stop polling and wait for the task, returning the final reconciler.
    pub async fn stop(self) -> Result<Reconciler, JoinError> {
        self.shutdown.trigger();
        self.task.await
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
