//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::SyncConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Environment variables that override file values.
pub const ENV_OVERRIDES: &[&str] = &[
    "RELOAD_INTERVAL",
    "POSTGRES_URI",
    "BASE_CADDY_FILE_PATH",
    "CADDY_ADMIN_URL",
    "PROXY_SNIPPET",
    "APPS_DOMAIN_NAME",
];

/// Load configuration from `path` (defaults when the file does not exist),
/// apply process environment overrides, then validate.
pub fn load_config(path: &Path) -> Result<SyncConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

pub fn load_config_with<F>(path: &Path, lookup: F) -> Result<SyncConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if path.is_file() {
        tracing::info!(path = %path.display(), "Loading config from file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        tracing::info!(
            path = %path.display(),
            "Config file not found, using defaults and environment"
        );
        SyncConfig::default()
    };

    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay values from the environment. Empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut SyncConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("RELOAD_INTERVAL") {
        config.reconcile.interval = v;
    }
    if let Some(v) = get("POSTGRES_URI") {
        config.database.uri = v;
    }
    if let Some(v) = get("BASE_CADDY_FILE_PATH") {
        config.proxy.base_config_path = v.into();
    }
    if let Some(v) = get("CADDY_ADMIN_URL") {
        config.proxy.admin_url = v;
    }
    if let Some(v) = get("PROXY_SNIPPET") {
        config.proxy.snippet_name = v;
    }
    if let Some(v) = get("APPS_DOMAIN_NAME") {
        config.proxy.apps_domain = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_falls_back_to_env() {
        let config = load_config_with(
            Path::new("/nonexistent/route-sync.toml"),
            env(&[
                ("POSTGRES_URI", "postgres://localhost/db"),
                ("RELOAD_INTERVAL", "15s"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.uri, "postgres://localhost/db");
        assert_eq!(config.reconcile.interval, "15s");
        assert_eq!(config.proxy.base_config_path, PathBuf::from("/etc/caddy/Caddyfile"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [database]
            uri = "postgres://file/db"

            [proxy]
            admin_url = "http://caddy:2019"
            apps_domain = "apps.file"
            "#
        )
        .unwrap();

        let config = load_config_with(
            file.path(),
            env(&[("APPS_DOMAIN_NAME", "apps.env"), ("PROXY_SNIPPET", "")]),
        )
        .unwrap();

        assert_eq!(config.database.uri, "postgres://file/db");
        assert_eq!(config.proxy.admin_url, "http://caddy:2019");
        assert_eq!(config.proxy.apps_domain, "apps.env");
        assert_eq!(config.proxy.snippet_name, "schemaless-reverse-proxy");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = load_config_with(Path::new("/nonexistent"), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("database.uri is required"));
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[reconcile\ninterval = ").unwrap();
        let err = load_config_with(file.path(), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
