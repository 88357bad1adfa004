//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the web player.
//! All types derive Serde traits so the effective configuration can be dumped
//! or loaded in tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Response format requested from the upstream server. Fixed.
pub const SUBSONIC_FORMAT: &str = "json";

/// Name of the UI directory shipped next to the binary.
pub const STATIC_DIR_NAME: &str = "static";

/// Root configuration for the web player backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WebPlayerConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Subsonic-compatible upstream server.
    pub upstream: UpstreamConfig,

    /// Location of the single-page UI.
    pub static_files: StaticConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5069,
        }
    }
}

/// Upstream (Navidrome / Subsonic) connection settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL without the `/rest` suffix.
    pub base_url: String,

    pub username: String,

    #[serde(skip_serializing)]
    pub password: String,

    /// Subsonic protocol version sent as `v`.
    pub version: String,

    /// Client identifier sent as `c`.
    pub client: String,

    /// Seconds to wait for upstream response headers. 0 disables the bound.
    pub timeout_secs: u64,

    /// Seconds allowed for the TCP/TLS handshake.
    pub connect_timeout_secs: u64,
}

impl UpstreamConfig {
    /// True when both username and password resolved to non-empty values.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .field("version", &self.version)
            .field("client", &self.client)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4533".to_string(),
            username: String::new(),
            password: String::new(),
            version: "1.16.1".to_string(),
            client: "homarr-webplayer".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Static UI location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory holding the UI entry point.
    pub dir: PathBuf,

    /// File name of the entry point.
    pub index: String,
}

impl StaticConfig {
    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index)
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            dir: default_static_dir(),
            index: "index.html".to_string(),
        }
    }
}

/// `static/` beside the running executable, else `static/` under the
/// working directory.
fn default_static_dir() -> PathBuf {
    resolve_static_dir(std::env::current_exe().ok().as_deref())
}

fn resolve_static_dir(exe: Option<&Path>) -> PathBuf {
    exe.and_then(Path::parent)
        .map(|dir| dir.join(STATIC_DIR_NAME))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(STATIC_DIR_NAME))
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
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl ObservabilityConfig {
    pub fn metrics_socket_addr(&self) -> Option<SocketAddr> {
        self.metrics_address.parse().ok()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
