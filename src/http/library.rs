//! Random-song and search query handlers.
//!
//! Both call upstream once, parse the Subsonic envelope and return songs in
//! the flat UI shape. Malformed upstream JSON maps to 502.
//!
//! Query strings are read as raw pairs and the first occurrence of a key
//! wins, so repeated keys never reject the request.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::subsonic::call::{DEFAULT_RANDOM_SIZE, DEFAULT_SEARCH_SONG_COUNT};
use crate::subsonic::envelope::{parse_songs, SongSource, SongSummary};
use crate::subsonic::SubsonicCall;

type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Default)]
pub struct RandomParams {
    pub size: Option<String>,
}

impl RandomParams {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            size: first(pairs, "size"),
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub song_count: Option<String>,
}

impl SearchParams {
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            query: first(pairs, "query"),
            song_count: first(pairs, "songCount"),
        }
    }
}

fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RandomSongsResponse {
    pub success: bool,
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SongSummary>,
}

/// Parse a count parameter; anything unparseable means "use the default".
fn count_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

/// `GET /api/random/list?size=N`
pub async fn random_list(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult<Json<RandomSongsResponse>> {
    let params = RandomParams::from_pairs(&pairs);
    let size = count_or(params.size.as_deref(), DEFAULT_RANDOM_SIZE);
    let body = state.subsonic.fetch(&SubsonicCall::RandomSongs { size }).await?;
    let songs = parse_songs(&body, SongSource::RandomSongs)?;

    tracing::debug!(requested = size, returned = songs.len(), "Random songs");

    Ok(Json(RandomSongsResponse { success: true, songs }))
}

/// `GET /api/search?query=...&songCount=N`
pub async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> ApiResult<Json<SearchResponse>> {
    let params = SearchParams::from_pairs(&pairs);
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::MissingQuery);
    }

    let song_count = count_or(params.song_count.as_deref(), DEFAULT_SEARCH_SONG_COUNT);
    let call = SubsonicCall::SearchSongs {
        query: query.to_string(),
        song_count,
    };
    let body = state.subsonic.fetch(&call).await?;
    let results = parse_songs(&body, SongSource::SearchResult)?;

    tracing::debug!(returned = results.len(), "Search");

    Ok(Json(SearchResponse { success: true, results }))
}
