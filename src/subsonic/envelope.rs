//! Subsonic response envelope parsing and song projection.
//!
//! Upstream wraps every JSON payload as `{"subsonic-response": {...}}`. Song
//! containers are inconsistent: `song` may be a list, a single object, null
//! or missing. Everything is normalized to a flat `Vec<SongSummary>`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Placeholder for a missing title or artist.
pub const UNKNOWN: &str = "Unknown";

/// Errors raised while reading an upstream envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Body is not JSON, or not shaped like an envelope.
    #[error("Upstream invalid JSON: {0}")]
    Invalid(#[from] serde_json::Error),

    /// Envelope reports `status: "failed"`.
    #[error("Upstream error {code}: {message}")]
    Failed { code: i64, message: String },
}

/// Which song container of the envelope to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongSource {
    /// `randomSongs.song`
    RandomSongs,
    /// `searchResult3.song`
    SearchResult,
}

/// UI-facing song shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    #[serde(rename = "coverArt")]
    pub cover_art: Option<String>,
}

impl SongSummary {
    /// Project one raw upstream entry. Null, empty and non-object entries
    /// yield `None`.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let fields = entry.as_object().filter(|m| !m.is_empty())?;
        let text = |key: &str| fields.get(key).and_then(scalar_text);

        let id = text("id");
        let cover_art = text("coverArt")
            .filter(|c| !c.is_empty())
            .or_else(|| id.clone());

        Some(Self {
            title: text("title").unwrap_or_else(|| UNKNOWN.to_string()),
            artist: text("artist").unwrap_or_else(|| UNKNOWN.to_string()),
            id,
            cover_art,
        })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "subsonic-response", default)]
    response: Option<ResponseBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    status: Option<String>,
    error: Option<SubsonicError>,
    #[serde(rename = "randomSongs")]
    random_songs: Option<SongContainer>,
    #[serde(rename = "searchResult3")]
    search_result: Option<SongContainer>,
}

#[derive(Debug, Deserialize)]
struct SubsonicError {
    code: Option<i64>,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SongContainer {
    song: Option<OneOrMany>,
}

// Subsonic JSON quirk: a single result is not wrapped in a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Value>),
    One(Value),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<Value> {
        match self {
            OneOrMany::Many(list) => list,
            OneOrMany::One(single) => vec![single],
        }
    }
}

/// Parse an upstream body and project the requested song list.
pub fn parse_songs(body: &[u8], source: SongSource) -> Result<Vec<SongSummary>, EnvelopeError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    let response = envelope.response.unwrap_or_default();

    if response.status.as_deref() == Some("failed") {
        let (code, message) = match response.error {
            Some(err) => (
                err.code.unwrap_or_default(),
                err.message.unwrap_or_else(|| "unknown error".to_string()),
            ),
            None => (0, "unknown error".to_string()),
        };
        return Err(EnvelopeError::Failed { code, message });
    }

    let container = match source {
        SongSource::RandomSongs => response.random_songs,
        SongSource::SearchResult => response.search_result,
    };

    Ok(container
        .and_then(|c| c.song)
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .iter()
        .filter_map(SongSummary::from_entry)
        .collect())
}
