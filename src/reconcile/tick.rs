//! One reconciliation tick: source → base fragment → render → apply.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::model::select_active;
use crate::domain::{DomainSource, DomainSourceError};
use crate::proxy::{ApplyError, ApplyReport, ProxyControl};
use crate::reconcile::outcome::{TickError, TickOutcome};
use crate::render::{BaseFragmentLoader, ConfigRenderer};
use crate::resilience::with_deadline;

/// Deadlines applied to the external calls of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickTimeouts {
    pub query: Duration,
    pub push: Duration,
}

impl Default for TickTimeouts {
    fn default() -> Self {
        Self {
            query: Duration::from_secs(30),
            push: Duration::from_secs(30),
        }
    }
}

/// Runs the tick pipeline against injected collaborators.
pub struct Reconciler {
    source: Arc<dyn DomainSource>,
    base: BaseFragmentLoader,
    renderer: ConfigRenderer,
    proxy: Arc<dyn ProxyControl>,
    timeouts: TickTimeouts,
}

impl Reconciler {
    pub fn new(
        source: Arc<dyn DomainSource>,
        base: BaseFragmentLoader,
        renderer: ConfigRenderer,
        proxy: Arc<dyn ProxyControl>,
    ) -> Self {
        Self {
            source,
            base,
            renderer,
            proxy,
            timeouts: TickTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: TickTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Build the full document without pushing it.
    ///
    /// Returns the rendered (pre-format) document and the number of active
    /// domains it contains. Records a source returns with any other status
    /// are not routed.
    pub async fn build_document(&self) -> Result<(String, usize), TickError> {
        let domains = select_active(
            with_deadline(
                self.timeouts.query,
                self.source.list_active_domains(),
                DomainSourceError::Timeout,
            )
            .await?,
        );
        let base = self.base.load().await?;
        let document = self.renderer.render(&base, &domains)?;
        Ok((document, domains.len()))
    }

    /// Run one tick. Never panics on stage failure; the error is captured in
    /// the outcome.
    pub async fn tick(&self, sequence: u64) -> TickOutcome {
        let started = Instant::now();
        tracing::debug!(tick = sequence, "Reloading proxy config");

        let mut domains = None;
        let result = async {
            let (document, count) = self.build_document().await?;
            domains = Some(count);
            let report = self.apply(&document).await?;
            Ok::<ApplyReport, TickError>(report)
        }
        .await;

        TickOutcome {
            sequence,
            elapsed: started.elapsed(),
            domains,
            result,
        }
    }

    async fn apply(&self, document: &str) -> Result<ApplyReport, ApplyError> {
        with_deadline(self.timeouts.push, self.proxy.apply(document), ApplyError::Timeout).await
    }
}
