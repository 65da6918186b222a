//! The domain source contract.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::model::DomainRecord;

/// Errors that can occur while reading desired state.
///
/// The reconciler treats every variant the same way: abort the tick and
/// wait for the next interval.
#[derive(Debug, Error)]
pub enum DomainSourceError {
    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Connectivity(String),

    /// The store was reachable but rejected the query.
    #[error("query failed: {0}")]
    Query(String),

    /// The query did not complete in time.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
}

/// Read-only view of the domains eligible for routing.
#[async_trait]
pub trait DomainSource: Send + Sync {
    /// Every `ACTIVATED` record, in a stable order.
    async fn list_active_domains(&self) -> Result<Vec<DomainRecord>, DomainSourceError>;
}
