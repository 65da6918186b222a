//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! reconciler. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::duration::{parse_duration, DurationError};

/// Root configuration for the route reconciler.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Tick interval and per-call deadlines.
    pub reconcile: ReconcileConfig,

    /// Relational store holding the domain records.
    pub database: DatabaseConfig,

    /// Caddy admin endpoint and rendering globals.
    pub proxy: ProxyConfig,

    /// Process lifecycle settings.
    pub lifecycle: LifecycleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Reconciliation loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Go-style duration string between ticks (e.g. "1m", "90s").
    pub interval: String,

    /// Deadline for the domain query in seconds.
    pub query_timeout_secs: u64,

    /// Deadline for the push to the proxy in seconds.
    pub push_timeout_secs: u64,
}

impl ReconcileConfig {
    /// Parsed tick interval.
    pub fn interval(&self) -> Result<Duration, DurationError> {
        parse_duration(&self.interval)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.push_timeout_secs)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            interval: "1m".to_string(),
            query_timeout_secs: 30,
            push_timeout_secs: 30,
        }
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection string. Required.
    pub uri: String,

    /// Maximum open connections in the pool.
    pub max_connections: u32,

    /// Idle connections are closed after this many seconds.
    pub idle_timeout_secs: u64,

    /// Connections are recycled after this many seconds.
    pub max_lifetime_secs: u64,

    /// How long to wait for a free connection before giving up.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            max_connections: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 3600,
            acquire_timeout_secs: 10,
        }
    }
}

/// Caddy admin and rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Base URL of the Caddy admin API (e.g., "http://localhost:2019").
    pub admin_url: String,

    /// Static Caddyfile fragment prepended to every rendered document.
    pub base_config_path: PathBuf,

    /// Name of the shared snippet imported by every generated site block.
    pub snippet_name: String,

    /// Suffix appended to the application id to form the upstream host.
    pub apps_domain: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            admin_url: "http://localhost:2019".to_string(),
            base_config_path: PathBuf::from("/etc/caddy/Caddyfile"),
            snippet_name: "schemaless-reverse-proxy".to_string(),
            apps_domain: "apps.local.schemaless.click".to_string(),
        }
    }
}

/// Lifecycle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// How long an in-flight tick may run after shutdown begins.
    pub shutdown_grace_secs: u64,
}

impl LifecycleConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            shutdown_grace_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
