//! Handler error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::subsonic::envelope::EnvelopeError;

/// Errors surfaced to API callers as `{success: false, error}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Username or password resolved to empty at startup.
    #[error("SUBSONIC_USER and SUBSONIC_PASSWORD env vars must be set")]
    MissingCredentials,

    /// `/api/search` without a usable `query`.
    #[error("No query")]
    MissingQuery,

    /// Connection refused, DNS failure, reset, ...
    #[error("Upstream request failed: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    /// No response headers within the configured bound.
    #[error("Upstream did not respond within {0} seconds")]
    UpstreamTimeout(u64),

    /// Query endpoint body was not a Subsonic JSON envelope.
    #[error("Upstream invalid JSON")]
    InvalidEnvelope(String),

    /// Envelope with `status: "failed"`.
    #[error("Upstream error {code}: {message}")]
    UpstreamFailed { code: i64, message: String },
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MissingQuery => StatusCode::BAD_REQUEST,
            ApiError::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::InvalidEnvelope(_) => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamFailed { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

// The request URL carries the auth token and salt; drop it before the
// error can reach a log line or a response body.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::UpstreamTransport(err.without_url())
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Invalid(e) => ApiError::InvalidEnvelope(e.to_string()),
            EnvelopeError::Failed { code, message } => ApiError::UpstreamFailed { code, message },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::MissingQuery => {}
            ApiError::MissingCredentials => tracing::error!(error = %self, "Configuration error"),
            ApiError::InvalidEnvelope(detail) => {
                tracing::warn!(detail = %detail, "Upstream returned an unparseable envelope")
            }
            _ => tracing::warn!(error = %self, status = %status, "Upstream call failed"),
        }

        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}
