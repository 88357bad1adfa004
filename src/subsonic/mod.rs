//! Subsonic-compatible upstream integration.
//!
//! # Data Flow
//! ```text
//! handler
//!     → call.rs (typed method + params)
//!     → auth.rs (fresh salt + token per call)
//!     → client.rs (reqwest GET /rest/<method>)
//!     → envelope.rs (JSON queries only: parse, normalize, project)
//! ```

pub mod auth;
pub mod call;
pub mod client;
pub mod envelope;

pub use auth::AuthParams;
pub use call::SubsonicCall;
pub use client::SubsonicClient;
pub use envelope::{SongSummary, UNKNOWN};
