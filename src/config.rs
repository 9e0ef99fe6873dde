use std::{env, fs, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "popcorn.json";
pub const API_KEY_ENV: &str = "POPCORN_OMDB_API_KEY";

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
// Free-tier key shipped with the app; override via config or env.
pub const DEFAULT_OMDB_API_KEY: &str = "ff03112d";
pub const DEFAULT_MAX_RATING: u8 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    /// `None` keeps the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
    /// When false, transport/HTTP failures on search clear the loader silently.
    pub report_search_failures: bool,
    pub max_rating: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            omdb_api_key: DEFAULT_OMDB_API_KEY.to_string(),
            omdb_base_url: DEFAULT_OMDB_BASE_URL.to_string(),
            request_timeout_secs: None,
            report_search_failures: true,
            max_rating: DEFAULT_MAX_RATING,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "apikey")]
    omdb_api_key: Option<String>,
    omdb_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    report_search_failures: Option<bool>,
    max_rating: Option<u8>,
}

impl AppConfig {
    fn merge(&mut self, parsed: RawConfig) {
        if let Some(key) = parsed.omdb_api_key.filter(|k| !k.trim().is_empty()) {
            self.omdb_api_key = key.trim().to_string();
        }
        if let Some(url) = parsed.omdb_base_url.filter(|u| !u.trim().is_empty()) {
            self.omdb_base_url = url.trim().to_string();
        }
        if parsed.request_timeout_secs.is_some() {
            self.request_timeout_secs = parsed.request_timeout_secs;
        }
        if let Some(flag) = parsed.report_search_failures {
            self.report_search_failures = flag;
        }
        if let Some(max) = parsed.max_rating {
            if (1..=10).contains(&max) {
                self.max_rating = max;
            } else {
                warn!("max_rating {max} out of range (1..=10); keeping {}", self.max_rating);
            }
        }
    }
}

/// Load `popcorn.json` from the working directory, then apply env overrides.
pub fn load_config() -> AppConfig {
    let mut cfg = load_config_from(&PathBuf::from(CONFIG_FILE));
    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            info!("Using OMDb key from {API_KEY_ENV}");
            cfg.omdb_api_key = key.trim().to_string();
        }
    }
    cfg
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                cfg.merge(parsed);
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Using defaults.",
                    cfg_path.display(),
                    err
                );
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_cfg(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.json"));
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let f = write_cfg(r#"{ "omdb_api_key": " abc123 ", "report_search_failures": false }"#);
        let cfg = load_config_from(f.path());
        assert_eq!(cfg.omdb_api_key, "abc123");
        assert!(!cfg.report_search_failures);
        assert_eq!(cfg.omdb_base_url, DEFAULT_OMDB_BASE_URL);
        assert_eq!(cfg.max_rating, DEFAULT_MAX_RATING);
    }

    #[test]
    fn apikey_alias_and_bad_max_rating() {
        let f = write_cfg(r#"{ "apikey": "k", "max_rating": 0, "request_timeout_secs": 15 }"#);
        let cfg = load_config_from(f.path());
        assert_eq!(cfg.omdb_api_key, "k");
        assert_eq!(cfg.max_rating, DEFAULT_MAX_RATING);
        assert_eq!(cfg.request_timeout_secs, Some(15));
    }

    #[test]
    fn malformed_json_falls_back() {
        let f = write_cfg("{ not json");
        assert_eq!(load_config_from(f.path()), AppConfig::default());
    }
}
