//! Postgres-backed domain source.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::domain::model::{select_active, DomainRecord, DomainStatus};
use crate::domain::source::{DomainSource, DomainSourceError};

const LIST_ACTIVE_DOMAINS: &str = r#"
    SELECT
      id::text AS id,
      domain_name,
      application_id::text AS application_id,
      owner_id::text AS owner_id,
      soa_email,
      status
    FROM application_domains
    WHERE status = $1
    ORDER BY created_at ASC, id ASC
"#;

#[derive(Debug, sqlx::FromRow)]
struct DomainRow {
    id: String,
    domain_name: Option<String>,
    application_id: Option<String>,
    owner_id: Option<String>,
    soa_email: Option<String>,
    status: Option<String>,
}

impl DomainRow {
    /// Every column is nullable. Rows with a NULL or blank routing column
    /// are dropped one by one instead of failing the whole query.
    fn into_record(self) -> Option<DomainRecord> {
        let status = match self.status.as_deref().unwrap_or_default().parse::<DomainStatus>() {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "Skipping domain with unknown status");
                return None;
            }
        };
        let (Some(domain_name), Some(application_id), Some(soa_email)) = (
            present(self.domain_name),
            present(self.application_id),
            present(self.soa_email),
        ) else {
            tracing::warn!(
                id = %self.id,
                "Skipping domain with missing name, application id or contact email"
            );
            return None;
        };
        Some(DomainRecord {
            id: self.id,
            domain_name,
            application_id,
            owner_id: self.owner_id.unwrap_or_default(),
            soa_email,
            status,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct PgDomainSource {
    pool: PgPool,
}

impl PgDomainSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool that connects on first use.
    ///
    /// An unreachable store is reported per tick instead of failing startup;
    /// a malformed connection string still fails here.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(0)
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.uri)?;

        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DomainSource for PgDomainSource {
    async fn list_active_domains(&self) -> Result<Vec<DomainRecord>, DomainSourceError> {
        let rows: Vec<DomainRow> = sqlx::query_as(LIST_ACTIVE_DOMAINS)
            .bind(DomainStatus::Activated.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        Ok(select_active(rows.into_iter().filter_map(DomainRow::into_record)))
    }
}

fn classify(err: sqlx::Error) -> DomainSourceError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => DomainSourceError::Connectivity(err.to_string()),
        other => DomainSourceError::Query(other.to_string()),
    }
}
