//! Upstream Subsonic HTTP client.
//!
//! # Responsibilities
//! - Build `/rest/<method>` URLs from the configured base URL
//! - Attach freshly generated auth parameters to every call
//! - Forward an optional `Range` header untouched
//! - Bound the wait for upstream response headers
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` per process, cloned into handlers
//! - No retries: failures surface to the caller immediately
//! - The deadline covers headers only for streamed calls, so long audio
//!   downloads are never cut off mid-body

use axum::body::Bytes;
use reqwest::header::{HeaderValue, RANGE};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::config::UpstreamConfig;
use crate::http::error::{ApiError, ApiResult};
use crate::observability::metrics;
use crate::subsonic::auth::AuthParams;
use crate::subsonic::call::SubsonicCall;

#[derive(Clone)]
pub struct SubsonicClient {
    http: reqwest::Client,
    config: Arc<UpstreamConfig>,
}

impl SubsonicClient {
    /// Create a client for the given upstream.
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Absolute URL of the REST method behind `call`.
    pub fn url_for(&self, call: &SubsonicCall) -> String {
        format!(
            "{}/rest/{}",
            self.config.base_url.trim_end_matches('/'),
            call.method()
        )
    }

    fn request(&self, call: &SubsonicCall) -> ApiResult<reqwest::RequestBuilder> {
        let auth = AuthParams::generate(&self.config)?;
        Ok(self
            .http
            .get(self.url_for(call))
            .query(&auth.to_query())
            .query(&call.params()))
    }

    /// Send `call` and return as soon as response headers arrive.
    ///
    /// The body is left unread so callers can stream it.
    pub async fn send(
        &self,
        call: &SubsonicCall,
        range: Option<&HeaderValue>,
    ) -> ApiResult<reqwest::Response> {
        let mut request = self.request(call)?;
        if let Some(range) = range {
            request = request.header(RANGE, range.clone());
        }

        tracing::debug!(
            endpoint = call.endpoint(),
            method = call.method(),
            range = ?range,
            "Calling upstream"
        );

        let start = Instant::now();
        let result = self.with_deadline(request.send()).await;
        record(call, &result.as_ref().map(|r| r.status().as_u16()), start);
        result
    }

    /// Send `call` and read the whole body.
    pub async fn fetch(&self, call: &SubsonicCall) -> ApiResult<Bytes> {
        let request = self.request(call)?;

        tracing::debug!(endpoint = call.endpoint(), method = call.method(), "Calling upstream");

        let start = Instant::now();
        let result = self
            .with_deadline(async move {
                let response = request.send().await?;
                let status = response.status().as_u16();
                response.bytes().await.map(|body| (status, body))
            })
            .await;
        record(call, &result.as_ref().map(|(status, _)| *status), start);
        result.map(|(_, body)| body)
    }

    async fn with_deadline<T, F>(&self, fut: F) -> ApiResult<T>
    where
        F: Future<Output = Result<T, reqwest::Error>>,
    {
        match self.config.timeout() {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| ApiError::UpstreamTimeout(self.config.timeout_secs))?
                .map_err(ApiError::from),
            None => fut.await.map_err(ApiError::from),
        }
    }
}

fn record(call: &SubsonicCall, outcome: &Result<u16, &ApiError>, start: Instant) {
    match outcome {
        Ok(status) => metrics::record_upstream(call.endpoint(), &status.to_string(), start),
        Err(ApiError::UpstreamTimeout(_)) => metrics::record_upstream(call.endpoint(), "timeout", start),
        Err(_) => metrics::record_upstream(call.endpoint(), "error", start),
    }
}
