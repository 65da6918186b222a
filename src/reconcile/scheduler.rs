//! Fixed-interval tick loop.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::reconcile::outcome::TickOutcome;
use crate::reconcile::tick::Reconciler;

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub failures: u64,
}

/// Drives [`Reconciler::tick`] on a fixed interval until shutdown.
pub struct Scheduler {
    reconciler: Reconciler,
    interval: Duration,
    observer: Option<mpsc::UnboundedSender<TickOutcome>>,
}

impl Scheduler {
    pub fn new(reconciler: Reconciler, interval: Duration) -> Self {
        Self {
            reconciler,
            interval,
            observer: None,
        }
    }

    /// Forward every outcome to `tx` after it has been logged.
    pub fn report_to(mut self, tx: mpsc::UnboundedSender<TickOutcome>) -> Self {
        self.observer = Some(tx);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run until `shutdown` reaches Draining.
    ///
    /// The first tick fires immediately. Ticks never overlap: a tick that
    /// outlives the interval delays the next one until it completes. A
    /// tick already running when draining begins is allowed to finish.
    pub async fn run(self, mut shutdown: ShutdownListener) -> RunSummary {
        tracing::info!(interval = ?self.interval, "Reconciliation scheduler starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut summary = RunSummary::default();

        loop {
            tokio::select! {
                biased;
                _ = shutdown.draining() => {
                    tracing::info!("Scheduler received shutdown signal, no new ticks");
                    break;
                }
                _ = ticker.tick() => {}
            }

            summary.ticks += 1;
            let outcome = self.reconciler.tick(summary.ticks).await;
            if !outcome.is_success() {
                summary.failures += 1;
            }

            outcome.log();
            metrics::record_tick(&outcome);
            if let Some(tx) = &self.observer {
                let _ = tx.send(outcome);
            }
        }

        tracing::info!(
            ticks = summary.ticks,
            failures = summary.failures,
            "Reconciliation scheduler stopped"
        );
        summary
    }
}
