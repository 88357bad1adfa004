//! Shared utilities for integration tests: a mock Subsonic upstream and a
//! helper that runs the real web player against it.

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use navidrome_webplayer::config::WebPlayerConfig;
use navidrome_webplayer::http::HttpServer;
use navidrome_webplayer::lifecycle::Shutdown;

pub const USER: &str = "alice";
pub const PASSWORD: &str = "sesame";
pub const COVER_BYTES: &[u8] = b"\x89PNG-not-really-an-image";
pub const AUDIO_LEN: usize = 2000;

/// How long `Behavior::Stall` holds query responses.
pub const STALL: Duration = Duration::from_secs(3);

/// `download?id=drip` sends this many chunks, `DRIP_INTERVAL` apart.
pub const DRIP_CHUNKS: u8 = 4;
pub const DRIP_CHUNK_LEN: usize = 10;
pub const DRIP_INTERVAL: Duration = Duration::from_millis(600);

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub params: HashMap<String, String>,
    pub range: Option<String>,
}

/// How the mock answers JSON queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    #[default]
    Normal,
    /// Query endpoints answer with an HTML error page.
    GarbageJson,
    /// Query endpoints answer `status: "failed"`.
    AuthFailure,
    /// Query endpoints wait `STALL` before answering.
    Stall,
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    log: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockUpstream {
    pub addr: SocketAddr,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl MockUpstream {
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("upstream received no request")
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Deterministic audio payload: byte i is i mod 251.
pub fn audio_bytes() -> Vec<u8> {
    (0..AUDIO_LEN).map(|i| (i % 251) as u8).collect()
}

fn record(state: &MockState, method: &str, params: &HashMap<String, String>, headers: &HeaderMap) {
    state.log.lock().unwrap().push(Recorded {
        method: method.to_string(),
        params: params.clone(),
        range: headers
            .get(header::RANGE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
}

fn envelope(key: &str, songs: Value) -> Value {
    json!({ "subsonic-response": { "status": "ok", "version": "1.16.1", key: { "song": songs } } })
}

fn query_failure(behavior: Behavior) -> Option<Response> {
    match behavior {
        Behavior::Normal | Behavior::Stall => None,
        Behavior::GarbageJson => Some(
            (StatusCode::OK, "<html><body>upstream exploded</body></html>").into_response(),
        ),
        Behavior::AuthFailure => Some(
            Json(json!({
                "subsonic-response": {
                    "status": "failed",
                    "error": { "code": 40, "message": "Wrong username or password" }
                }
            }))
            .into_response(),
        ),
    }
}

async fn cover_art(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "getCoverArt", &params, &headers);
    if params.get("id").map(String::as_str) == Some("missing") {
        return (StatusCode::NOT_FOUND, "Artwork not found").into_response();
    }
    let mut builder = Response::builder().status(StatusCode::OK);
    if params.get("id").map(String::as_str) != Some("untyped") {
        builder = builder
            .header(header::CONTENT_TYPE, "image/png")
            .header(header::ETAG, "\"cover-v1\"")
            .header(header::CACHE_CONTROL, "public, max-age=315360000");
    }
    builder.header("x-upstream-secret", "leak").body(Body::from(COVER_BYTES)).unwrap()
}

async fn download(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "download", &params, &headers);
    if params.get("id").map(String::as_str) == Some("missing") {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }
    if params.get("id").map(String::as_str) == Some("drip") {
        return drip();
    }

    let data = audio_bytes();
    let range_start = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("bytes="))
        .and_then(|v| v.trim_end_matches('-').parse::<usize>().ok());

    match range_start {
        Some(start) if start < data.len() => Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::ACCEPT_RANGES, "bytes")
            .header(
                header::CONTENT_RANGE,
                format!("bytes {}-{}/{}", start, data.len() - 1, data.len()),
            )
            .header(header::CONTENT_DISPOSITION, "attachment; filename=\"track.mp3\"")
            .body(Body::from(data[start..].to_vec()))
            .unwrap(),
        Some(_) => Response::builder()
            .status(StatusCode::RANGE_NOT_SATISFIABLE)
            .header(header::CONTENT_RANGE, format!("bytes */{}", data.len()))
            .body(Body::empty())
            .unwrap(),
        // No Content-Type and no Accept-Ranges so defaults kick in.
        None => Response::builder()
            .status(StatusCode::OK)
            .body(Body::from(data))
            .unwrap(),
    }
}

// Headers go out at once; the body trickles in over several intervals.
fn drip() -> Response {
    let chunks = futures_util::stream::unfold(0u8, |i| async move {
        if i == DRIP_CHUNKS {
            return None;
        }
        if i > 0 {
            tokio::time::sleep(DRIP_INTERVAL).await;
        }
        Some((Ok::<_, std::io::Error>(Bytes::from(vec![i; DRIP_CHUNK_LEN])), i + 1))
    });
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/flac")
        .body(Body::from_stream(chunks))
        .unwrap()
}

async fn stall(behavior: Behavior) {
    if behavior == Behavior::Stall {
        tokio::time::sleep(STALL).await;
    }
}

async fn random_songs(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "getRandomSongs", &params, &headers);
    stall(state.behavior).await;
    if let Some(failure) = query_failure(state.behavior) {
        return failure;
    }

    let size: usize = params.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    if size == 1 {
        return Json(envelope("randomSongs", json!({ "id": "only", "title": "Solo" }))).into_response();
    }

    let songs: Vec<Value> = (0..size)
        .map(|i| match i % 3 {
            0 => json!({ "id": format!("s{}", i), "title": format!("Song {}", i), "artist": "Band", "coverArt": format!("al-{}", i) }),
            1 => json!({ "id": format!("s{}", i), "album": "No metadata" }),
            _ => json!({ "id": format!("s{}", i), "title": format!("Song {}", i), "coverArt": "" }),
        })
        .collect();
    Json(envelope("randomSongs", Value::Array(songs))).into_response()
}

async fn search3(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "search3", &params, &headers);
    stall(state.behavior).await;
    if let Some(failure) = query_failure(state.behavior) {
        return failure;
    }

    match params.get("query").map(String::as_str) {
        Some("test") => Json(envelope(
            "searchResult3",
            json!([
                { "id": "t1", "title": "Test Pattern", "artist": "Signals", "coverArt": "al-t" },
                null,
                { "id": "t2" }
            ]),
        ))
        .into_response(),
        Some("one") => Json(envelope("searchResult3", json!({ "id": "o1", "artist": "Single" }))).into_response(),
        _ => Json(json!({ "subsonic-response": { "status": "ok", "searchResult3": {} } })).into_response(),
    }
}

/// Start a mock Subsonic server on an ephemeral port.
pub async fn start_mock_upstream(behavior: Behavior) -> MockUpstream {
    let log = Arc::new(Mutex::new(Vec::new()));
    let state = MockState { behavior, log: log.clone() };

    let app = Router::new()
        .route("/rest/getCoverArt", get(cover_art))
        .route("/rest/download", get(download))
        .route("/rest/getRandomSongs", get(random_songs))
        .route("/rest/search3", get(search3))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, log }
}

/// A running web player plus the handle that stops it.
pub struct TestPlayer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub static_dir: PathBuf,
}

impl TestPlayer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestPlayer {
    fn drop(&mut self) {
        self.shutdown.trigger();
        let _ = std::fs::remove_dir_all(&self.static_dir);
    }
}

/// Config pointing at `upstream_url` with test credentials and a fresh UI dir.
pub fn test_config(upstream_url: &str) -> WebPlayerConfig {
    let mut config = WebPlayerConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.upstream.base_url = upstream_url.to_string();
    config.upstream.username = USER.into();
    config.upstream.password = PASSWORD.into();
    config.upstream.timeout_secs = 5;
    config.static_files.dir =
        std::env::temp_dir().join(format!("webplayer-test-{}", uuid::Uuid::new_v4()));
    config
}

/// Run the web player with `config` on an ephemeral port.
pub async fn start_player(config: WebPlayerConfig) -> TestPlayer {
    let static_dir = config.static_files.dir.clone();
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestPlayer { addr, shutdown, static_dir }
}

/// Non-pooled client that ignores system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
