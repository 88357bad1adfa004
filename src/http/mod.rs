//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, request span)
//!     → assets.rs  (index.html, /ping)
//!     → media.rs   (cover art, audio: upstream GET → response.rs relay)
//!     → library.rs (random, search: upstream GET → envelope → JSON)
//!     → error.rs   (failures as {success:false, error})
//! ```

pub mod assets;
pub mod error;
pub mod library;
pub mod media;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
