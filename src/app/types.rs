// src/app/types.rs
use chrono::NaiveDate;

use super::error::FetchError;

// ---- search ----
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<SearchResultItem>),
    /// Provider said `Response: "False"`; carries its `Error` text verbatim.
    NoResults(String),
}

// ---- detail ----
#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub runtime_text: String,
    pub runtime_minutes: Option<u32>,
    pub genre: String,
    pub director: String,
    pub actors: Vec<String>,
    pub plot: String,
    pub released_text: String,
    pub released: Option<NaiveDate>,
    pub imdb_rating: Option<f32>,
}

impl MovieDetail {
    /// Build the watchlist entry for this title. Unknown numbers become 0.
    pub fn to_candidate(&self) -> WatchCandidate {
        WatchCandidate {
            id: self.id.clone(),
            title: self.title.clone(),
            poster_url: self.poster_url.clone(),
            year: self.year.clone(),
            runtime_minutes: self.runtime_minutes.unwrap_or(0),
            external_rating: self.imdb_rating.unwrap_or(0.0),
        }
    }
}

// ---- watchlist ----
/// A watchlist entry before the user's rating is attached.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchCandidate {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub runtime_minutes: u32,
    pub external_rating: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WatchedItem {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub runtime_minutes: u32,
    pub external_rating: f32,
    pub user_rating: u8,
}

impl WatchedItem {
    pub fn from_candidate(c: WatchCandidate, user_rating: u8) -> Self {
        Self {
            id: c.id,
            title: c.title,
            poster_url: c.poster_url,
            year: c.year,
            runtime_minutes: c.runtime_minutes,
            external_rating: c.external_rating,
            user_rating,
        }
    }
}

// ---- cross-thread messages / data ----
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    pub seq: u64,
    pub id: String,
}

pub enum FetchMsg {
    Search {
        seq: u64,
        result: Result<SearchOutcome, FetchError>,
    },
    Detail {
        seq: u64,
        id: String,
        result: Result<MovieDetail, FetchError>,
    },
    Poster {
        key: String,
        result: Result<(u32, u32, Vec<u8>), String>,
    },
}

// ---- detail panel phases ----
#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    Idle,
    Loading { id: String },
    Loaded(MovieDetail),
    Failed { id: String, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailPhase {
    Idle,
    Loading,
    Ready,
    Watched,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyWatched,
    MissingRating,
}
