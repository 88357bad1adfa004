//! Configuration loading from the process environment.

use std::path::PathBuf;

use crate::config::schema::{LogFormat, WebPlayerConfig};
use crate::config::validation::{validate_config, ValidationError};

pub const PORT: &str = "PORT";
pub const HOST: &str = "HOST";
pub const NAVIDROME_URL: [&str; 2] = ["NAVIDROME_URL", "NAVIDROME_BASE_URL"];
pub const USERNAME: [&str; 2] = ["SUBSONIC_USER", "NAVIDROME_USER"];
pub const PASSWORD: [&str; 3] = ["SUBSONIC_PASSWORD", "NAVIDROME_PASS", "NAVIDROME_PASSWORD"];
pub const SUBSONIC_VERSION: &str = "SUBSONIC_VERSION";
pub const SUBSONIC_CLIENT: &str = "SUBSONIC_CLIENT";
pub const UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
pub const UPSTREAM_CONNECT_TIMEOUT_SECS: &str = "UPSTREAM_CONNECT_TIMEOUT_SECS";
pub const STATIC_DIR: &str = "STATIC_DIR";
pub const LOG_FORMAT: &str = "LOG_FORMAT";
pub const METRICS_ENABLED: &str = "METRICS_ENABLED";
pub const METRICS_ADDRESS: &str = "METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    InvalidValue { key: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl WebPlayerConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration from an arbitrary key lookup.
    ///
    /// A key that is present but empty is treated as unset, so the next
    /// fallback name (or the default) applies.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let first = |keys: &[&str]| keys.iter().find_map(|&k| get(k));

        let mut config = WebPlayerConfig::default();

        if let Some(host) = get(HOST) {
            config.listener.host = host;
        }
        if let Some(port) = get(PORT) {
            config.listener.port = parse_value(PORT, &port)?;
        }

        if let Some(url) = first(&NAVIDROME_URL) {
            config.upstream.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(user) = first(&USERNAME) {
            config.upstream.username = user;
        }
        if let Some(password) = first(&PASSWORD) {
            config.upstream.password = password;
        }
        if let Some(version) = get(SUBSONIC_VERSION) {
            config.upstream.version = version;
        }
        if let Some(client) = get(SUBSONIC_CLIENT) {
            config.upstream.client = client;
        }
        if let Some(secs) = get(UPSTREAM_TIMEOUT_SECS) {
            config.upstream.timeout_secs = parse_value(UPSTREAM_TIMEOUT_SECS, &secs)?;
        }
        if let Some(secs) = get(UPSTREAM_CONNECT_TIMEOUT_SECS) {
            config.upstream.connect_timeout_secs =
                parse_value(UPSTREAM_CONNECT_TIMEOUT_SECS, &secs)?;
        }

        if let Some(dir) = get(STATIC_DIR) {
            config.static_files.dir = PathBuf::from(dir);
        }

        if let Some(format) = get(LOG_FORMAT) {
            config.observability.log_format = match format.trim().to_ascii_lowercase().as_str() {
                "pretty" | "text" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue { key: LOG_FORMAT, value: format });
                }
            };
        }
        if let Some(enabled) = get(METRICS_ENABLED) {
            config.observability.metrics_enabled = parse_bool(METRICS_ENABLED, &enabled)?;
        }
        if let Some(addr) = get(METRICS_ADDRESS) {
            config.observability.metrics_address = addr;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: raw.to_string() }),
    }
}
