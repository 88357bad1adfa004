//! Cover art and audio proxy handlers.
//!
//! Both are transparent pipes: one upstream GET per request, status and
//! allow-listed headers copied, body streamed. Audio goes through
//! `download` rather than `stream` because only the former guarantees
//! byte-range support, which the browser needs for seeking.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Response,
};

use crate::http::error::ApiResult;
use crate::http::response::{relay, AUDIO_STREAM, COVER_ART};
use crate::http::server::AppState;
use crate::subsonic::SubsonicCall;

/// `GET /api/cover/{id}`
pub async fn cover_art(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let call = SubsonicCall::CoverArt { id };
    let upstream = state.subsonic.send(&call, None).await?;

    if !upstream.status().is_success() {
        tracing::debug!(call = ?call, status = %upstream.status(), "Cover art not served upstream");
    }

    Ok(relay(upstream, &COVER_ART))
}

/// `GET /api/stream/{id}`, honoring an optional `Range` header.
pub async fn stream_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let range = headers.get(header::RANGE);
    let call = SubsonicCall::Download { id };
    let upstream = state.subsonic.send(&call, range).await?;

    tracing::debug!(
        call = ?call,
        range = ?range,
        status = %upstream.status(),
        content_range = ?upstream.headers().get(header::CONTENT_RANGE),
        "Relaying audio"
    );

    Ok(relay(upstream, &AUDIO_STREAM))
}
