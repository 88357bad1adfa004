//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, NAVIDROME_URL, SUBSONIC_USER, ...)
//!     → loader.rs (fallback key chains, defaults, parsing)
//!     → validation.rs (semantic checks)
//!     → WebPlayerConfig (validated, immutable)
//!     → shared via Arc to handlers
//! ```
//!
//! # Design Decisions
//! - Environment is read once at startup, never from request handlers
//! - All fields have defaults; only credentials have no usable default
//! - Validation separates parsing from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, StaticConfig, UpstreamConfig, WebPlayerConfig,
    SUBSONIC_FORMAT,
};
