//! Tick outcomes.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::domain::DomainSourceError;
use crate::proxy::{ApplyError, ApplyReport};
use crate::render::{BaseFragmentError, TemplateError};

/// Pipeline stage of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Source,
    BaseFragment,
    Render,
    Format,
    Push,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Source => "source",
            Stage::BaseFragment => "base_fragment",
            Stage::Render => "render",
            Stage::Format => "format",
            Stage::Push => "push",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a tick was aborted.
#[derive(Debug, Error)]
pub enum TickError {
    #[error(transparent)]
    Source(#[from] DomainSourceError),

    #[error(transparent)]
    BaseFragment(#[from] BaseFragmentError),

    #[error("template failure: {0}")]
    Render(#[from] TemplateError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl TickError {
    pub fn stage(&self) -> Stage {
        match self {
            TickError::Source(_) => Stage::Source,
            TickError::BaseFragment(_) => Stage::BaseFragment,
            TickError::Render(_) => Stage::Render,
            TickError::Apply(ApplyError::Format(_)) => Stage::Format,
            TickError::Apply(_) => Stage::Push,
        }
    }
}

/// Result of one reconciliation attempt. Observability only.
#[derive(Debug)]
pub struct TickOutcome {
    /// 1-based tick counter.
    pub sequence: u64,
    pub elapsed: Duration,
    /// Active domains rendered, when the source stage succeeded.
    pub domains: Option<usize>,
    pub result: Result<ApplyReport, TickError>,
}

impl TickOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        self.result.as_ref().err().map(TickError::stage)
    }

    /// Emit the outcome as a structured log event.
    pub fn log(&self) {
        let elapsed_ms = self.elapsed.as_millis() as u64;
        match &self.result {
            Ok(report) => tracing::info!(
                tick = self.sequence,
                domains = self.domains.unwrap_or_default(),
                status = report.status,
                bytes = report.bytes_sent,
                elapsed_ms,
                "Proxy config reloaded"
            ),
            Err(e) => tracing::error!(
                tick = self.sequence,
                stage = %e.stage(),
                error = %e,
                elapsed_ms,
                "Reconciliation tick failed"
            ),
        }
    }
}
