//! Typed upstream calls.
//!
//! Each variant enumerates exactly the query parameters its Subsonic method
//! needs; auth parameters are added by the client at send time.

/// Default `size` for `getRandomSongs`.
pub const DEFAULT_RANDOM_SIZE: u32 = 30;

/// Default `songCount` for `search3`.
pub const DEFAULT_SEARCH_SONG_COUNT: u32 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsonicCall {
    /// `getCoverArt?id=`
    CoverArt { id: String },
    /// `download?id=`. Serves the original file, so byte ranges work.
    Download { id: String },
    /// `getRandomSongs?size=`
    RandomSongs { size: u32 },
    /// `search3?query=&songCount=&albumCount=0&artistCount=0`
    SearchSongs { query: String, song_count: u32 },
}

impl SubsonicCall {
    /// REST method name appended to `/rest/`.
    pub fn method(&self) -> &'static str {
        match self {
            SubsonicCall::CoverArt { .. } => "getCoverArt",
            SubsonicCall::Download { .. } => "download",
            SubsonicCall::RandomSongs { .. } => "getRandomSongs",
            SubsonicCall::SearchSongs { .. } => "search3",
        }
    }

    /// Short label used in logs and metrics.
    pub fn endpoint(&self) -> &'static str {
        match self {
            SubsonicCall::CoverArt { .. } => "cover",
            SubsonicCall::Download { .. } => "stream",
            SubsonicCall::RandomSongs { .. } => "random",
            SubsonicCall::SearchSongs { .. } => "search",
        }
    }

    /// Method-specific query parameters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            SubsonicCall::CoverArt { id } | SubsonicCall::Download { id } => {
                vec![("id", id.clone())]
            }
            SubsonicCall::RandomSongs { size } => vec![("size", size.to_string())],
            SubsonicCall::SearchSongs { query, song_count } => vec![
                ("query", query.clone()),
                ("songCount", song_count.to_string()),
                ("albumCount", "0".to_string()),
                ("artistCount", "0".to_string()),
            ],
        }
    }
}
