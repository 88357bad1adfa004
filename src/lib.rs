//! Navidrome web player backend library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod subsonic;

pub use config::WebPlayerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
