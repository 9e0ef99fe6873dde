// src/app/controller.rs
use tracing::{debug, info, warn};

use super::error::FetchError;
use super::types::{
    AddOutcome, DetailPhase, DetailRequest, DetailState, MovieDetail, SearchOutcome,
    SearchRequest, SearchResultItem, WatchCandidate, WatchedItem,
};
use super::watchlist::{WatchedSummary, Watchlist};

/// Queries shorter than this (after trimming) never reach the network.
pub const MIN_QUERY_LEN: usize = 3;

/// Owns every piece of state the panels read. Network effects are returned as
/// requests; completions come back through `apply_search` / `apply_detail`.
#[derive(Debug)]
pub struct AppController {
    query: String,
    results: Vec<SearchResultItem>,
    loading: bool,
    error: String,
    selected_id: Option<String>,
    detail: DetailState,
    watchlist: Watchlist,
    pending_rating: Option<u8>,

    // latest issued request ids; anything older is stale
    search_seq: u64,
    detail_seq: u64,

    report_search_failures: bool,
}

impl Default for AppController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AppController {
    pub fn new(report_search_failures: bool) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            loading: false,
            error: String::new(),
            selected_id: None,
            detail: DetailState::Idle,
            watchlist: Watchlist::new(),
            pending_rating: None,
            search_seq: 0,
            detail_seq: 0,
            report_search_failures,
        }
    }

    // ---- read side ----
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Empty means no error.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn pending_rating(&self) -> Option<u8> {
        self.pending_rating
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_watchlist(&self.watchlist)
    }

    /// Stored rating for the selected title, if it is already watched.
    pub fn already_rated(&self) -> Option<u8> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.watchlist.rating_for(id))
    }

    pub fn detail_phase(&self) -> DetailPhase {
        match &self.detail {
            DetailState::Idle => DetailPhase::Idle,
            DetailState::Loading { .. } => DetailPhase::Loading,
            DetailState::Failed { .. } => DetailPhase::Failed,
            DetailState::Loaded(d) if self.watchlist.contains(&d.id) => DetailPhase::Watched,
            DetailState::Loaded(_) => DetailPhase::Ready,
        }
    }

    // ---- search ----
    /// Replace the query. Returns the request to run, if the query is long enough.
    pub fn set_query(&mut self, text: &str) -> Option<SearchRequest> {
        if text == self.query {
            return None;
        }
        self.query = text.to_string();
        self.error.clear();
        self.results.clear();
        // Invalidate whatever is in flight, even if no new request follows.
        self.search_seq += 1;

        let trimmed = self.query.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            self.loading = false;
            return None;
        }

        self.loading = true;
        Some(SearchRequest {
            seq: self.search_seq,
            query: trimmed.to_string(),
        })
    }

    /// Apply a finished search. Returns false when the response was stale.
    pub fn apply_search(&mut self, seq: u64, result: Result<SearchOutcome, FetchError>) -> bool {
        if seq != self.search_seq {
            debug!(
                "dropping stale search response #{seq} (latest #{})",
                self.search_seq
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(SearchOutcome::Found(items)) => {
                debug!("search #{seq}: {} results", items.len());
                self.results = items;
            }
            Ok(SearchOutcome::NoResults(msg)) => {
                debug!("search #{seq}: {msg}");
                self.error = msg;
            }
            Err(e) => {
                if self.report_search_failures {
                    warn!("search #{seq} failed: {e}");
                    self.error = format!("Search failed: {e}");
                } else {
                    debug!("search #{seq} failed (not reported): {e}");
                }
            }
        }
        true
    }

    // ---- selection / detail ----
    /// Toggle selection: re-selecting the open title closes it.
    pub fn select_item(&mut self, id: &str) -> Option<DetailRequest> {
        if self.selected_id.as_deref() == Some(id) {
            self.close_detail();
            return None;
        }
        self.selected_id = Some(id.to_string());
        self.pending_rating = None;
        self.detail_seq += 1;
        self.detail = DetailState::Loading { id: id.to_string() };
        Some(DetailRequest {
            seq: self.detail_seq,
            id: id.to_string(),
        })
    }

    pub fn close_detail(&mut self) {
        self.selected_id = None;
        self.pending_rating = None;
        self.detail = DetailState::Idle;
        self.detail_seq += 1;
    }

    pub fn apply_detail(
        &mut self,
        seq: u64,
        id: &str,
        result: Result<MovieDetail, FetchError>,
    ) -> bool {
        if seq != self.detail_seq || self.selected_id.as_deref() != Some(id) {
            debug!("dropping stale detail response #{seq} for {id}");
            return false;
        }
        self.detail = match result {
            Ok(detail) => DetailState::Loaded(detail),
            Err(e) if e.is_parse() => {
                warn!("detail for {id}: OMDb payload did not parse: {e}");
                DetailState::Failed {
                    id: id.to_string(),
                    message: e.to_string(),
                }
            }
            Err(e) => {
                warn!("detail for {id} failed: {e}");
                DetailState::Failed {
                    id: id.to_string(),
                    message: e.to_string(),
                }
            }
        };
        true
    }

    // ---- watchlist ----
    pub fn set_user_rating(&mut self, value: u8) {
        self.pending_rating = (value > 0).then_some(value);
    }

    /// Add `candidate` with the pending rating. A duplicate id leaves the list
    /// untouched. Selection and pending rating are cleared either way.
    ///
    /// Without a pending rating nothing changes, not even the selection: the
    /// detail panel stays open so a rating can still be picked. The UI only
    /// offers "Add" once a rating is set, so this path is for callers only.
    pub fn add_watched(&mut self, candidate: WatchCandidate) -> AddOutcome {
        let Some(rating) = self.pending_rating else {
            return AddOutcome::MissingRating;
        };
        let id = candidate.id.clone();
        let outcome = if self
            .watchlist
            .insert(WatchedItem::from_candidate(candidate, rating))
        {
            info!("watched +{id} (rated {rating})");
            AddOutcome::Added
        } else {
            debug!("{id} already watched; list unchanged");
            AddOutcome::AlreadyWatched
        };
        self.close_detail();
        outcome
    }

    /// Add the title currently shown in the detail panel.
    pub fn add_selected(&mut self) -> Option<AddOutcome> {
        let DetailState::Loaded(detail) = &self.detail else {
            return None;
        };
        let candidate = detail.to_candidate();
        Some(self.add_watched(candidate))
    }

    pub fn remove_watched(&mut self, id: &str) -> bool {
        let removed = self.watchlist.remove(id);
        if removed {
            info!("watched -{id}");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::omdb::parse_detail_body;

    fn result(id: &str, title: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.into(),
            title: title.into(),
            year: "2010".into(),
            poster_url: "N/A".into(),
        }
    }

    fn candidate(id: &str) -> WatchCandidate {
        WatchCandidate {
            id: id.into(),
            title: format!("Movie {id}"),
            poster_url: "N/A".into(),
            year: "1999".into(),
            runtime_minutes: 100,
            external_rating: 7.0,
        }
    }

    fn add(ctl: &mut AppController, id: &str, rating: u8) -> AddOutcome {
        ctl.select_item(id);
        ctl.set_user_rating(rating);
        ctl.add_watched(candidate(id))
    }

    #[test]
    fn short_queries_issue_no_request() {
        let mut ctl = AppController::default();
        for q in ["", "a", "ab", "  ab  ", "é"] {
            assert_eq!(ctl.set_query(q), None, "query {q:?}");
            assert!(ctl.results().is_empty());
            assert!(!ctl.is_loading());
        }
        let req = ctl.set_query(" abc ").unwrap();
        assert_eq!(req.query, "abc");
        assert!(ctl.is_loading());
    }

    #[test]
    fn unchanged_query_does_not_refetch() {
        let mut ctl = AppController::default();
        assert!(ctl.set_query("matrix").is_some());
        assert!(ctl.set_query("matrix").is_none());
    }

    #[test]
    fn search_success_and_no_results() {
        let mut ctl = AppController::default();
        let req = ctl.set_query("inception").unwrap();
        assert!(ctl.apply_search(
            req.seq,
            Ok(SearchOutcome::Found(vec![result("tt1375666", "Inception")]))
        ));
        assert!(!ctl.is_loading());
        assert_eq!(ctl.results().len(), 1);
        assert_eq!(ctl.error(), "");

        let req = ctl.set_query("zzzzqqq").unwrap();
        assert!(ctl.results().is_empty());
        ctl.apply_search(req.seq, Ok(SearchOutcome::NoResults("Movie not found!".into())));
        assert_eq!(ctl.error(), "Movie not found!");
        assert!(ctl.results().is_empty());
        assert!(!ctl.is_loading());
    }

    #[test]
    fn stale_search_response_is_dropped() {
        let mut ctl = AppController::default();
        let old = ctl.set_query("star").unwrap();
        let new = ctl.set_query("star wars").unwrap();

        let fresh = Ok(SearchOutcome::Found(vec![result("tt0076759", "Star Wars")]));
        assert!(ctl.apply_search(new.seq, fresh));

        let late = Ok(SearchOutcome::Found(vec![result("tt1", "Star Trek")]));
        assert!(!ctl.apply_search(old.seq, late));
        assert_eq!(ctl.results()[0].id, "tt0076759");
    }

    #[test]
    fn shortening_query_cancels_pending_loader() {
        let mut ctl = AppController::default();
        let req = ctl.set_query("alien").unwrap();
        assert!(ctl.set_query("al").is_none());
        assert!(!ctl.is_loading());
        assert!(!ctl.apply_search(req.seq, Ok(SearchOutcome::Found(vec![result("tt1", "Alien")]))));
        assert!(ctl.results().is_empty());
    }

    #[test]
    fn http_failure_reporting_is_configurable() {
        let mut loud = AppController::new(true);
        let req = loud.set_query("heat").unwrap();
        loud.apply_search(req.seq, Err(FetchError::Status { status: 503 }));
        assert_eq!(loud.error(), "Search failed: HTTP 503");
        assert!(!loud.is_loading());

        let mut quiet = AppController::new(false);
        let req = quiet.set_query("heat").unwrap();
        quiet.apply_search(req.seq, Err(FetchError::Transport("refused".into())));
        assert_eq!(quiet.error(), "");
        assert!(!quiet.is_loading());
        assert!(quiet.results().is_empty());
    }

    #[test]
    fn select_toggles_and_replaces() {
        let mut ctl = AppController::default();
        assert!(ctl.select_item("tt1").is_some());
        assert_eq!(ctl.selected_id(), Some("tt1"));
        assert!(ctl.select_item("tt1").is_none());
        assert_eq!(ctl.selected_id(), None);
        assert_eq!(ctl.detail_phase(), DetailPhase::Idle);

        ctl.select_item("tt1");
        ctl.select_item("tt2");
        assert_eq!(ctl.selected_id(), Some("tt2"));
        assert_eq!(ctl.detail_phase(), DetailPhase::Loading);

        ctl.close_detail();
        assert_eq!(ctl.selected_id(), None);
    }

    #[test]
    fn stale_detail_is_dropped() {
        let mut ctl = AppController::default();
        let first = ctl.select_item("tt1").unwrap();
        let second = ctl.select_item("tt2").unwrap();
        let body = r#"{"Title":"One","Runtime":"90 min","imdbRating":"6.0"}"#;
        assert!(!ctl.apply_detail(first.seq, "tt1", parse_detail_body("tt1", body)));
        assert_eq!(ctl.detail_phase(), DetailPhase::Loading);

        let body = r#"{"Title":"Two","Runtime":"91 min","imdbRating":"6.1"}"#;
        assert!(ctl.apply_detail(second.seq, "tt2", parse_detail_body("tt2", body)));
        assert_eq!(ctl.detail_phase(), DetailPhase::Ready);

        // closed before completion
        let req = ctl.select_item("tt3").unwrap();
        ctl.close_detail();
        assert!(!ctl.apply_detail(req.seq, "tt3", parse_detail_body("tt3", body)));
        assert_eq!(ctl.detail(), &DetailState::Idle);
    }

    #[test]
    fn detail_failure_is_reported() {
        let mut ctl = AppController::default();
        let req = ctl.select_item("tt404").unwrap();
        ctl.apply_detail(req.seq, "tt404", Err(FetchError::Api("Incorrect IMDb ID.".into())));
        assert_eq!(ctl.detail_phase(), DetailPhase::Failed);
        match ctl.detail() {
            DetailState::Failed { message, .. } => assert_eq!(message, "Incorrect IMDb ID."),
            other => panic!("unexpected {other:?}"),
        }
        assert!(ctl.add_selected().is_none());
    }

    #[test]
    fn add_is_idempotent_per_id() {
        let mut ctl = AppController::default();
        assert_eq!(add(&mut ctl, "tt1", 8), AddOutcome::Added);
        assert_eq!(add(&mut ctl, "tt2", 5), AddOutcome::Added);
        let before = ctl.watchlist().clone();

        assert_eq!(add(&mut ctl, "tt1", 2), AddOutcome::AlreadyWatched);
        assert_eq!(ctl.watchlist(), &before);
        assert_eq!(ctl.selected_id(), None);
        assert_eq!(ctl.pending_rating(), None);
    }

    #[test]
    fn add_requires_rating() {
        let mut ctl = AppController::default();
        ctl.select_item("tt1");
        ctl.set_user_rating(0);
        assert_eq!(ctl.add_watched(candidate("tt1")), AddOutcome::MissingRating);
        assert!(ctl.watchlist().is_empty());
        assert_eq!(ctl.selected_id(), Some("tt1"));
        assert_eq!(ctl.detail_phase(), DetailPhase::Loading);
    }

    #[test]
    fn remove_watched_present_and_absent() {
        let mut ctl = AppController::default();
        add(&mut ctl, "tt1", 8);
        add(&mut ctl, "tt2", 6);
        assert!(!ctl.remove_watched("tt9"));
        assert_eq!(ctl.watchlist().len(), 2);
        assert!(ctl.remove_watched("tt1"));
        assert_eq!(ctl.watchlist().len(), 1);
        assert!(!ctl.watchlist().contains("tt1"));
    }

    #[test]
    fn watched_phase_and_already_rated() {
        let mut ctl = AppController::default();
        add(&mut ctl, "tt1", 9);

        let req = ctl.select_item("tt1").unwrap();
        let body = r#"{"Title":"One","Runtime":"90 min","imdbRating":"6.0"}"#;
        ctl.apply_detail(req.seq, "tt1", parse_detail_body("tt1", body));
        assert_eq!(ctl.detail_phase(), DetailPhase::Watched);
        assert_eq!(ctl.already_rated(), Some(9));

        ctl.remove_watched("tt1");
        assert_eq!(ctl.detail_phase(), DetailPhase::Ready);
        assert_eq!(ctl.already_rated(), None);
    }

    #[test]
    fn ready_to_watched_via_add_selected() {
        let mut ctl = AppController::default();
        let req = ctl.select_item("tt1375666").unwrap();
        let body = r#"{"Title":"Inception","Year":"2010","Runtime":"148 min","imdbRating":"8.8","Poster":"N/A"}"#;
        ctl.apply_detail(req.seq, "tt1375666", parse_detail_body("tt1375666", body));
        ctl.set_user_rating(10);
        assert_eq!(ctl.add_selected(), Some(AddOutcome::Added));

        let w = &ctl.watchlist().items()[0];
        assert_eq!(w.runtime_minutes, 148);
        assert_eq!(w.external_rating, 8.8);
        assert_eq!(w.user_rating, 10);
        assert_eq!(ctl.detail_phase(), DetailPhase::Idle);
    }
}
