//! Upstream response relay.
//!
//! # Responsibilities
//! - Copy upstream status verbatim (206, 304, 404, ... all pass through)
//! - Copy a fixed allow-list of headers, then fill in defaults
//! - Stream the body chunk by chunk without buffering it
//!
//! # Design Decisions
//! - Only allow-listed headers cross over; hop-by-hop and upstream server
//!   headers never reach the client
//! - Range logic stays upstream; nothing here inspects or recomputes ranges

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use futures_util::TryStreamExt;

/// Which headers a proxied response keeps and which it defaults.
#[derive(Debug)]
pub struct RelayPolicy {
    /// Lowercase header names copied when present and non-empty.
    pub passthrough: &'static [&'static str],
    /// Headers set when upstream omitted them.
    pub defaults: &'static [(&'static str, &'static str)],
}

pub const COVER_ART: RelayPolicy = RelayPolicy {
    passthrough: &[
        "content-type",
        "content-length",
        "cache-control",
        "etag",
        "last-modified",
        "accept-ranges",
    ],
    defaults: &[("content-type", "image/jpeg")],
};

pub const AUDIO_STREAM: RelayPolicy = RelayPolicy {
    passthrough: &[
        "content-type",
        "content-length",
        "accept-ranges",
        "content-range",
        "cache-control",
        "etag",
        "last-modified",
        "content-disposition",
    ],
    defaults: &[("accept-ranges", "bytes"), ("content-type", "audio/mpeg")],
};

impl RelayPolicy {
    /// Build the client-facing header map from upstream headers.
    pub fn curate(&self, upstream: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();

        for name in self.passthrough {
            if let Some(value) = upstream.get(*name).filter(|v| !v.is_empty()) {
                headers.insert(HeaderName::from_static(*name), value.clone());
            }
        }
        for (name, value) in self.defaults {
            headers
                .entry(HeaderName::from_static(*name))
                .or_insert_with(|| HeaderValue::from_static(*value));
        }

        headers
    }
}

/// Turn an upstream response into a streamed client response.
pub fn relay(upstream: reqwest::Response, policy: &RelayPolicy) -> Response {
    let status = upstream.status();
    let headers = policy.curate(upstream.headers());

    let body = upstream.bytes_stream().map_err(|e| {
        let e = e.without_url();
        tracing::warn!(error = %e, "Upstream body stream interrupted");
        e
    });

    let mut response = Response::new(Body::from_stream(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
