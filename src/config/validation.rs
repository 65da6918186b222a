//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval parses and is positive, timeouts > 0)
//! - Check URLs and required values before any subsystem is built
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SyncConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::duration::DurationError;
use crate::config::schema::SyncConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("reconcile.interval: {0}")]
    Interval(DurationError),

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("database.uri is required")]
    MissingDatabaseUri,

    #[error("proxy.admin_url '{url}' is invalid: {reason}")]
    AdminUrl { url: String, reason: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.reconcile.interval() {
        errors.push(ValidationError::Interval(e));
    }
    if config.reconcile.query_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "reconcile.query_timeout_secs",
        });
    }
    if config.reconcile.push_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "reconcile.push_timeout_secs",
        });
    }

    if config.database.uri.trim().is_empty() {
        errors.push(ValidationError::MissingDatabaseUri);
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "database.max_connections",
        });
    }

    match Url::parse(&config.proxy.admin_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::AdminUrl {
            url: config.proxy.admin_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::AdminUrl {
            url: config.proxy.admin_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.proxy.base_config_path.as_os_str().is_empty() {
        errors.push(ValidationError::Empty {
            field: "proxy.base_config_path",
        });
    }
    if config.proxy.snippet_name.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "proxy.snippet_name",
        });
    }
    if config.proxy.apps_domain.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "proxy.apps_domain",
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
