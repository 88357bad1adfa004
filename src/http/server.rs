//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::WebPlayerConfig;
use crate::http::request::{make_request_span, propagate_request_id, set_request_id};
use crate::http::{assets, library, media};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::subsonic::SubsonicClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub subsonic: SubsonicClient,
}

/// HTTP server for the web player.
pub struct HttpServer {
    router: Router,
    config: Arc<WebPlayerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: WebPlayerConfig) -> Result<Self, reqwest::Error> {
        let subsonic = SubsonicClient::new(config.upstream.clone())?;
        let state = AppState { subsonic };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &WebPlayerConfig, state: AppState) -> Router {
        let index = config.static_files.index_path();

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
            .allow_headers(Any)
            .expose_headers([header::CONTENT_RANGE, header::ACCEPT_RANGES, header::CONTENT_LENGTH]);

        Router::new()
            .route("/", assets::index_route(&index))
            .route("/index.html", assets::index_route(&index))
            .route("/ping", get(assets::ping))
            .route("/api/cover/{id}", get(media::cover_art))
            .route("/api/stream/{id}", get(media::stream_audio))
            .route("/api/random/list", get(library::random_list))
            .route("/api/search", get(library::search))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(propagate_request_id())
                    .layer(cors),
            )
    }

    /// The assembled router, for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain open requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &WebPlayerConfig {
        &self.config
    }
}
