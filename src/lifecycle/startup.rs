//! Startup orchestration.
//!
//! # Responsibilities
//! - Report configuration problems that are survivable (missing
//!   credentials, missing UI) before traffic arrives
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until a termination signal
//!
//! # Design Decisions
//! - Fail fast on bind errors; never fail on a missing index.html

use tokio::net::TcpListener;

use crate::config::WebPlayerConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Survivable problems worth a warning at startup.
pub fn preflight(config: &WebPlayerConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if !config.upstream.has_credentials() {
        warnings.push(
            "SUBSONIC_USER / SUBSONIC_PASSWORD not set; API requests will fail with 500".to_string(),
        );
    }

    let index = config.static_files.index_path();
    if !index.is_file() {
        warnings.push(format!("{} not found; / will return 404", index.display()));
    }

    warnings
}

/// Start every subsystem and serve until shutdown.
pub async fn run(config: WebPlayerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        user = %config.upstream.username,
        version = %config.upstream.version,
        client = %config.upstream.client,
        timeout_secs = config.upstream.timeout_secs,
        static_dir = %config.static_files.dir.display(),
        "Configuration loaded"
    );

    for warning in preflight(&config) {
        tracing::warn!("{}", warning);
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_socket_addr() {
            Some(addr) => metrics::init_metrics(addr),
            None => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::forward_signals(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
