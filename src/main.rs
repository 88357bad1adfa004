//! Navidrome Web Player backend.
//!
//! Serves the single-page player UI and proxies a Subsonic-compatible
//! server (Navidrome).
//!
//! ```text
//!   Browser / dashboard widget              Navidrome (/rest/...)
//!
//!   GET /, /index.html   ──▶ assets    (static file, no upstream call)
//!   GET /api/cover/{id}  ──▶ media     ──▶ getCoverArt
//!   GET /api/stream/{id} ──▶ media     ──▶ download        (Range forwarded)
//!   GET /api/random/list ──▶ library   ──▶ getRandomSongs
//!   GET /api/search      ──▶ library   ──▶ search3
//! ```

use clap::Parser;
use std::path::PathBuf;

use navidrome_webplayer::config::WebPlayerConfig;
use navidrome_webplayer::lifecycle::startup;
use navidrome_webplayer::observability::logging;

/// Command-line overrides. Everything else comes from the environment.
#[derive(Parser, Debug)]
#[command(name = "navidrome-webplayer", version, about = "Navidrome web player backend")]
struct Cli {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory containing index.html (overrides STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut WebPlayerConfig) {
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.static_files.dir = dir;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = WebPlayerConfig::from_env()?;
    cli.apply(&mut config);

    logging::init_logging(config.observability.log_format);
    tracing::info!("navidrome-webplayer v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
