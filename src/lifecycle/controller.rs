//! Process lifecycle controller.
//!
//! Runs the scheduler in a background task and drives it through the
//! shutdown phases.

use std::time::Duration;
use tokio::time;

use crate::lifecycle::shutdown::Shutdown;
use crate::reconcile::{RunSummary, Scheduler};

/// How the controller finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The scheduler stopped after draining.
    Clean(RunSummary),
    /// The in-flight tick outlived the grace period and was abandoned.
    GraceExpired,
    /// A second termination request arrived while draining.
    Forced,
    /// The scheduler task died on its own.
    Crashed,
}

impl Exit {
    pub fn code(&self) -> i32 {
        match self {
            Exit::Clean(_) => 0,
            Exit::GraceExpired | Exit::Forced | Exit::Crashed => 1,
        }
    }
}

/// Spawn `scheduler`, wait for Draining, then wait for it to stop.
pub async fn run(scheduler: Scheduler, shutdown: Shutdown, grace: Duration) -> Exit {
    let mut handle = tokio::spawn(scheduler.run(shutdown.subscribe()));
    let mut listener = shutdown.subscribe();

    tokio::select! {
        joined = &mut handle => {
            return match joined {
                Ok(summary) => Exit::Clean(summary),
                Err(e) => {
                    tracing::error!(error = %e, "Scheduler task terminated unexpectedly");
                    Exit::Crashed
                }
            };
        }
        _ = listener.draining() => {}
    }

    tracing::info!(grace = ?grace, "Draining, waiting for in-flight tick");
    let abort = handle.abort_handle();

    tokio::select! {
        joined = &mut handle => match joined {
            Ok(summary) => Exit::Clean(summary),
            Err(e) => {
                tracing::error!(error = %e, "Scheduler task failed while draining");
                Exit::Crashed
            }
        },
        _ = listener.force_exit() => {
            abort.abort();
            Exit::Forced
        }
        _ = time::sleep(grace) => {
            tracing::warn!("Shutdown grace period expired, abandoning in-flight tick");
            abort.abort();
            Exit::GraceExpired
        }
    }
}
