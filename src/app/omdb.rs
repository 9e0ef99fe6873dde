// src/app/omdb.rs
use std::time::Duration;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::error::FetchError;
use super::types::{MovieDetail, SearchOutcome, SearchResultItem};
use crate::config::AppConfig;

static RUNTIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)").expect("runtime regex is valid"));

/// Blocking movie catalog. Implementations are shared across fetch threads.
pub trait MovieApi: Send + Sync {
    fn search(&self, query: &str) -> Result<SearchOutcome, FetchError>;
    fn detail(&self, id: &str) -> Result<MovieDetail, FetchError>;
    fn poster(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = cfg.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Transport(format!("reqwest client build: {e}")))?;
        Ok(Self {
            client,
            base_url: cfg.omdb_base_url.clone(),
            api_key: cfg.omdb_api_key.clone(),
        })
    }

    pub(crate) fn search_url(&self, query: &str) -> String {
        format!(
            "{}?apikey={}&s={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query)
        )
    }

    pub(crate) fn detail_url(&self, id: &str) -> String {
        format!(
            "{}?apikey={}&i={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(id)
        )
    }

    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(resp.text()?)
    }
}

impl MovieApi for OmdbClient {
    fn search(&self, query: &str) -> Result<SearchOutcome, FetchError> {
        debug!("omdb search {query:?}");
        let body = self.get_text(&self.search_url(query))?;
        parse_search_body(&body)
    }

    fn detail(&self, id: &str) -> Result<MovieDetail, FetchError> {
        debug!("omdb detail {id}");
        let body = self.get_text(&self.detail_url(id))?;
        parse_detail_body(id, &body)
    }

    fn poster(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())?;
        Ok(bytes.to_vec())
    }
}

// ---- payloads ----
#[derive(Debug, Deserialize)]
struct RawSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<RawSearchItem>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(f64),
}

#[derive(Debug, Deserialize)]
struct RawDetail {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<TextOrNumber>,
}

fn is_false(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("false")
}

pub fn parse_search_body(body: &str) -> Result<SearchOutcome, FetchError> {
    let raw: RawSearch = serde_json::from_str(body)?;
    if is_false(&raw.response) {
        let msg = raw.error.unwrap_or_else(|| "No results".to_string());
        return Ok(SearchOutcome::NoResults(msg));
    }
    let items = raw
        .search
        .into_iter()
        .map(|r| SearchResultItem {
            id: r.imdb_id,
            title: r.title,
            year: r.year,
            poster_url: r.poster,
        })
        .collect();
    Ok(SearchOutcome::Found(items))
}

pub fn parse_detail_body(id: &str, body: &str) -> Result<MovieDetail, FetchError> {
    let raw: RawDetail = serde_json::from_str(body)?;
    if raw.response.as_deref().is_some_and(is_false) {
        return Err(FetchError::Api(
            raw.error.unwrap_or_else(|| "lookup failed".to_string()),
        ));
    }
    let title = raw
        .title
        .ok_or_else(|| FetchError::Parse("detail payload has no Title".to_string()))?;

    let imdb_rating = match raw.imdb_rating {
        Some(TextOrNumber::Number(n)) => Some(n as f32),
        Some(TextOrNumber::Text(s)) => s.trim().parse::<f32>().ok(),
        None => None,
    }
    .filter(|r| (0.0..=10.0).contains(r));

    let actors = raw
        .actors
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty() && !is_na(a))
        .map(str::to_string)
        .collect();

    Ok(MovieDetail {
        id: id.to_string(),
        title,
        year: raw.year,
        poster_url: raw.poster,
        runtime_minutes: parse_runtime_minutes(&raw.runtime),
        runtime_text: raw.runtime,
        genre: raw.genre,
        director: raw.director,
        actors,
        plot: raw.plot,
        released: parse_released(&raw.released),
        released_text: raw.released,
        imdb_rating,
    })
}

/// Leading integer of strings like `"148 min"`.
pub fn parse_runtime_minutes(s: &str) -> Option<u32> {
    RUNTIME_RE
        .captures(s)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

pub fn parse_released(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d %b %Y").ok()
}

pub fn is_na(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("n/a")
}
