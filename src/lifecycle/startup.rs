//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated `SyncConfig` into wired components
//! - Inject each collaborator through its constructor
//!
//! # Design Decisions
//! - Fail fast: any wiring error is fatal
//! - The store pool is lazy, so an unreachable database fails ticks, not
//!   startup

use std::sync::Arc;
use thiserror::Error;

use crate::config::duration::DurationError;
use crate::config::SyncConfig;
use crate::domain::PgDomainSource;
use crate::proxy::{AdminClient, ApplyError};
use crate::reconcile::{Reconciler, Scheduler, TickTimeouts};
use crate::render::{BaseFragmentLoader, ConfigRenderer, RenderGlobals};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid reconcile interval: {0}")]
    Interval(#[from] DurationError),

    #[error("database pool: {0}")]
    Database(#[from] sqlx::Error),

    #[error("proxy client: {0}")]
    Proxy(#[from] ApplyError),
}

/// Everything the controller needs to run.
pub struct Components {
    pub scheduler: Scheduler,
    pub store: Arc<PgDomainSource>,
}

/// Build a reconciler backed by Postgres and the Caddy admin API.
pub fn build_reconciler(
    config: &SyncConfig,
) -> Result<(Reconciler, Arc<PgDomainSource>), StartupError> {
    let store = Arc::new(PgDomainSource::connect_lazy(&config.database)?);
    let proxy = Arc::new(AdminClient::new(
        &config.proxy.admin_url,
        config.reconcile.push_timeout(),
    )?);

    let reconciler = Reconciler::new(
        store.clone(),
        BaseFragmentLoader::new(&config.proxy.base_config_path),
        ConfigRenderer::new(RenderGlobals::from(&config.proxy)),
        proxy,
    )
    .with_timeouts(TickTimeouts {
        query: config.reconcile.query_timeout(),
        push: config.reconcile.push_timeout(),
    });

    Ok((reconciler, store))
}

pub fn build(config: &SyncConfig) -> Result<Components, StartupError> {
    let interval = config.reconcile.interval()?;
    let (reconciler, store) = build_reconciler(config)?;

    tracing::info!(
        interval = %config.reconcile.interval,
        admin_url = %config.proxy.admin_url,
        base_config = %config.proxy.base_config_path.display(),
        "Components initialized"
    );

    Ok(Components {
        scheduler: Scheduler::new(reconciler, interval),
        store,
    })
}
